//! User-facing strings

pub const NO_DATA: &str = "No phone numbers available.";
pub const FILTERED_OUT: &str = "No phone numbers match these filters. Try different filters.";
pub const LOAD_FAILED: &str = "Could not load phone numbers. Please try again.";

pub const SELECT_AT_LEAST_ONE: &str = "Please select at least one phone number.";
pub const BOOK_TITLE: &str = "Book phone numbers";
pub const BOOKED_TITLE: &str = "Booking successful";
pub const COPY_PROMPT: &str = "Copy the booked numbers to the clipboard?";
pub const QUOTA_EXCEEDED: &str = "You have reached your booking limit. Release some numbers or try again later.";
pub const BOOK_FAILED: &str = "Booking failed. Please try again.";

pub const INVALID_ID: &str = "Invalid phone number id.";
pub const DELETE_TITLE: &str = "Delete phone number";
pub const DELETE_CONFIRM: &str = "Are you sure you want to delete this phone number? This action cannot be undone.";
pub const DELETED: &str = "Phone number deleted.";
pub const DELETE_FAILED: &str = "Could not delete the phone number.";

pub const DETAIL_TITLE: &str = "Phone number details";

pub const GENERIC_ERROR: &str = "Something went wrong, please try again.";
pub const NAME_REQUIRED: &str = "Name is required.";
pub const EXPIRATION_FORMAT: &str = "Enter the time as HH.MM.SS.";
pub const TYPE_NUMBER_EXISTS: &str = "This type number already exists.";
pub const PROVIDER_EXISTS: &str = "This provider already exists.";

pub const REPORT_NO_DATA: &str = "No data yet.";
