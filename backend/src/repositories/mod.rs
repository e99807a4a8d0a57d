//! Data access layer
//!
//! All storage access goes through a [`UnitOfWork`], which owns one open
//! transaction, and its [`Repository`], which exposes one CRUD method family
//! per entity. Handlers decide when to commit; an abandoned unit of work
//! rolls back.

mod exercises;
mod food;
mod humor;
mod mood;
mod sleep;
mod uow;
mod user;
mod water;

pub use exercises::{ExercisesPatch, ExercisesRecord, NewExercises};
pub use food::{FoodPatch, FoodRecord, NewFood};
pub use humor::{HumorPatch, HumorRecord, NewHumor};
pub use mood::{MoodRecord, MoodWithEntries};
pub use sleep::{NewSleep, SleepPatch, SleepRecord};
pub use uow::{Repository, UnitOfWork};
pub use user::UserAuthRecord;
pub use water::{NewWater, WaterPatch, WaterRecord};
