//! Training focus catalog.
//!
//! The primary field picks a category; the secondary and tertiary fields
//! share one option list that depends on that category.

/// Primary categories, in display order.
pub const PRIMARY_OPTIONS: [&str; 9] = [
    "weightlifting",
    "bodyweight",
    "aerobics",
    "mobility",
    "rest day",
    "sports",
    "outdoors",
    "cheat day",
    "mix",
];

const WEIGHTLIFTING: &[&str] = &[
    "push", "pull", "full body", "chest", "shoulders", "triceps", "biceps", "arms",
    "forearms", "lats", "traps", "back", "legs", "glutes", "calves", "thighs", "core",
    "hamstrings", "abs", "grip",
];

const BODYWEIGHT: &[&str] = &[
    "push", "pull", "full body", "circuit", "calisthenics", "gymnastics", "chest",
    "shoulders", "triceps", "biceps", "arms", "forearms", "lats", "traps", "back", "legs",
    "glutes", "calves", "thighs", "core", "hamstrings", "abs", "grip",
];

const AEROBICS: &[&str] = &[
    "running", "rowing", "swimming", "cycling", "jump rope", "dance", "cardio boxing",
    "elliptical", "stair climbing", "sprints", "circuit", "walking",
];

const MOBILITY: &[&str] = &[
    "yoga", "pilates", "tai chi", "static stretch", "dynamic stretch", "gymnastics", "ballet",
];

const REST_DAY: &[&str] = &[
    "do nothing", "sleep", "watch tv", "read", "get a massage", "cuisine", "hobby",
    "socialization", "self care", "meditation",
];

const SPORTS: &[&str] = &[
    "Soccer", "Basketball", "Cricket", "Tennis", "Baseball", "Softball", "Field Hockey",
    "Ice Hockey", "Rugby", "American Football", "Water Polo", "Handball", "Dodgeball",
    "Kickball", "Ultimate Frisbee", "Pickleball", "Squash", "Racquetball", "Badminton",
    "Lacrosse", "other",
];

const OUTDOORS: &[&str] = &[
    "running", "hiking", "cycling", "mountain biking", "rock climbing", "skiing",
    "snowboarding", "surfing", "horseback riding", "kayaking", "canoeing", "skateboarding",
];

const CHEAT_DAY: &[&str] = &[
    "indulge", "dessert binge", "overeat", "drinks", "carbo load", "cheese day",
    "treat yourself",
];

const MIX: &[&str] = &[
    "weightlifting", "bodyweight", "aerobics", "mobility", "rest day", "sports", "outdoors",
    "cheat day",
];

/// Ordered primary options.
pub fn primary_options() -> &'static [&'static str] {
    &PRIMARY_OPTIONS
}

/// Options for the secondary and tertiary fields under `primary`.
///
/// Unknown categories yield an empty slice.
pub fn secondary_options(primary: &str) -> &'static [&'static str] {
    match primary {
        "weightlifting" => WEIGHTLIFTING,
        "bodyweight" => BODYWEIGHT,
        "aerobics" => AEROBICS,
        "mobility" => MOBILITY,
        "rest day" => REST_DAY,
        "sports" => SPORTS,
        "outdoors" => OUTDOORS,
        "cheat day" => CHEAT_DAY,
        "mix" => MIX,
        _ => &[],
    }
}

/// True when `field2` and `field3` both belong to the option set of `field1`.
pub fn is_valid_triplet(field1: &str, field2: &str, field3: &str) -> bool {
    if !PRIMARY_OPTIONS.contains(&field1) {
        return false;
    }
    let options = secondary_options(field1);
    options.contains(&field2) && options.contains(&field3)
}
