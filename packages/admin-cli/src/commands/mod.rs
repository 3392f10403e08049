pub mod auth;
pub mod bookings;
pub mod payments;
pub mod properties;
pub mod users;
