pub mod booking;
pub mod lifecycle;
pub mod queue;
pub mod stats;

pub use booking::AppointmentBookingService;
pub use lifecycle::AppointmentLifecycleService;
pub use queue::QueueProjectionService;
pub use stats::AppointmentStatsService;
