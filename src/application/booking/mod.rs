mod booking_service;

pub use booking_service::{
    create_booking, get_booking, list_bookings_as_booker, list_bookings_as_owner, set_approval,
};
