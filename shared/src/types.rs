//! API request and response types
//!
//! Every request body rejects unknown keys: the endpoints enforce an exact
//! allow-list per operation, and an unexpected field is a client error, not
//! something to silently drop.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Authentication
// ============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Bearer token response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

// ============================================================================
// Humor
// ============================================================================

/// Create a humor entry; `date` defaults to today when omitted
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateHumorRequest {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub value: i32,
    pub description: String,
    pub health_based: bool,
}

/// Partial update of a humor entry; the date is not patchable
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateHumorRequest {
    #[serde(default)]
    pub value: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub health_based: Option<bool>,
}

impl UpdateHumorRequest {
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.description.is_none() && self.health_based.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HumorResponse {
    pub id: i64,
    pub date: NaiveDate,
    pub value: i32,
    pub description: Option<String>,
    pub health_based: bool,
}

// ============================================================================
// Water intake
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateWaterRequest {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub milliliters: i32,
    pub description: String,
    pub pee: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateWaterRequest {
    #[serde(default)]
    pub milliliters: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub pee: Option<bool>,
}

impl UpdateWaterRequest {
    pub fn is_empty(&self) -> bool {
        self.milliliters.is_none() && self.description.is_none() && self.pee.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterResponse {
    pub id: i64,
    pub date: NaiveDate,
    pub milliliters: i32,
    pub description: Option<String>,
    pub pee: bool,
}

// ============================================================================
// Exercises
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateExercisesRequest {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub minutes: i32,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateExercisesRequest {
    #[serde(default)]
    pub minutes: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
}

impl UpdateExercisesRequest {
    pub fn is_empty(&self) -> bool {
        self.minutes.is_none() && self.description.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExercisesResponse {
    pub id: i64,
    pub date: NaiveDate,
    pub minutes: i32,
    pub description: Option<String>,
}

// ============================================================================
// Food habits
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateFoodRequest {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub value: i32,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateFoodRequest {
    #[serde(default)]
    pub value: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
}

impl UpdateFoodRequest {
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.description.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodResponse {
    pub id: i64,
    pub date: NaiveDate,
    pub value: i32,
    pub description: String,
}

// ============================================================================
// Sleep
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateSleepRequest {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub value: i32,
    pub minutes: i32,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateSleepRequest {
    #[serde(default)]
    pub value: Option<i32>,
    #[serde(default)]
    pub minutes: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
}

impl UpdateSleepRequest {
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.minutes.is_none() && self.description.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepResponse {
    pub id: i64,
    pub date: NaiveDate,
    pub value: i32,
    pub minutes: i32,
    pub description: Option<String>,
}

// ============================================================================
// Mood
// ============================================================================

/// Structured mood creation: one entry of each tracked category for a date.
///
/// All four child objects are required; each child may carry its own date,
/// falling back to the mood's date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateMoodRequest {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub humors: CreateHumorRequest,
    pub water_intakes: CreateWaterRequest,
    pub exercises: CreateExercisesRequest,
    pub food_habits: CreateFoodRequest,
}

/// Partial mood update: each patch present is applied to every child entry
/// of that category belonging to the mood.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateMoodRequest {
    #[serde(default)]
    pub humors: Option<UpdateHumorRequest>,
    #[serde(default)]
    pub water_intakes: Option<UpdateWaterRequest>,
    #[serde(default)]
    pub exercises: Option<UpdateExercisesRequest>,
    #[serde(default)]
    pub food_habits: Option<UpdateFoodRequest>,
}

impl UpdateMoodRequest {
    pub fn is_empty(&self) -> bool {
        self.humors.is_none()
            && self.water_intakes.is_none()
            && self.exercises.is_none()
            && self.food_habits.is_none()
    }
}

/// A mood with all of its child entries eagerly attached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodResponse {
    pub id: i64,
    pub date: NaiveDate,
    pub humors: Vec<HumorResponse>,
    pub water_intakes: Vec<WaterResponse>,
    pub exercises: Vec<ExercisesResponse>,
    pub food_habits: Vec<FoodResponse>,
    pub sleeps: Vec<SleepResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_key_rejected() {
        let body = r#"{"value":5,"description":"ok","health_based":false,"extra":1}"#;
        let parsed: Result<CreateHumorRequest, _> = serde_json::from_str(body);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_missing_required_key_rejected() {
        let body = r#"{"value":5,"description":"ok"}"#;
        let parsed: Result<CreateHumorRequest, _> = serde_json::from_str(body);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_date_defaults_to_none() {
        let body = r#"{"value":5,"description":"ok","health_based":false}"#;
        let parsed: CreateHumorRequest = serde_json::from_str(body).unwrap();
        assert!(parsed.date.is_none());
    }

    #[test]
    fn test_date_not_patchable() {
        let body = r#"{"date":"2012-12-21","value":5}"#;
        let parsed: Result<UpdateHumorRequest, _> = serde_json::from_str(body);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_empty_patch_detected() {
        let patch: UpdateHumorRequest = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());

        let patch: UpdateHumorRequest = serde_json::from_str(r#"{"value":3}"#).unwrap();
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_mood_requires_all_four_children() {
        let body = r#"{
            "humors": {"value":5,"description":"ok","health_based":false},
            "water_intakes": {"milliliters":500,"description":"bottle","pee":true},
            "exercises": {"minutes":30,"description":"run"}
        }"#;
        let parsed: Result<CreateMoodRequest, _> = serde_json::from_str(body);
        assert!(parsed.is_err());
    }
}
