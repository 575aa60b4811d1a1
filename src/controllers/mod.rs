pub mod booking_controller;
pub mod vehicle_controller;

pub use booking_controller::BookingController;
pub use vehicle_controller::VehicleController;
