//! Domain types shared across the service.

pub mod catalog;
pub mod event;
pub mod guidance;
pub mod persona;

pub use catalog::{GreenJob, JobCategory, TrainingProgram};
pub use event::InteractionEvent;
pub use guidance::{GuidanceReply, GuidanceRequest, TaskKind};
pub use persona::{
    BrazilState, EducationLevel, Language, Persona, PersonaDraft, PersonaUpdate, ReadinessLevel,
};
