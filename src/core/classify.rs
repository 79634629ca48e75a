use crate::models::LegalityCategory;

/// Rifles and pistols require more than this many feet to the nearest
/// dwelling (exclusive threshold)
pub const ALL_FIREARMS_THRESHOLD_FEET: u64 = 5000;

/// Shotguns, BB and air rifles require more than this many feet
/// (exclusive threshold)
pub const LIMITED_THRESHOLD_FEET: u64 = 1000;

/// Map a measured distance to a legality category.
///
/// Pure function, no I/O. `None` means no building was found within the
/// widest search radius and maps to the unverified-remote category, never
/// to a definite "legal".
pub fn classify(distance_feet: Option<u64>) -> LegalityCategory {
    match distance_feet {
        None => LegalityCategory::UnknownRemote,
        Some(d) if d > ALL_FIREARMS_THRESHOLD_FEET => LegalityCategory::AllFirearms,
        Some(d) if d > LIMITED_THRESHOLD_FEET => LegalityCategory::Limited,
        Some(_) => LegalityCategory::Illegal,
    }
}
