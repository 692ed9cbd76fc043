pub mod actor_role;
pub mod batch_status;
pub mod event_type;

pub use actor_role::ActorRole;
pub use batch_status::BatchStatus;
pub use event_type::EventType;
