pub mod clock;
pub mod debug;
pub mod direction;
pub mod dispatcher;
pub mod elevator_event;
pub mod elevator_status;
pub mod request_registry;
