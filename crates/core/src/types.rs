/// Backend-assigned login identifier of a monitored user.
pub type UserId = String;

/// Backend-assigned identifier of a facility.
pub type HospitalId = String;

/// Timestamps are passed through as the backend formats them (ISO-8601).
pub type Timestamp = String;
