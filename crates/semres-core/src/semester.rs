//! Semester code translation.
//!
//! The lookup form offers semesters as plain numbers while the results
//! service keys everything by a Roman-numeral label (`"Semester-III"`).

/// Codes accepted by [`translate`], in semester order.
pub const SEMESTER_CODES: [&str; 8] = ["1", "2", "3", "4", "5", "6", "7", "8"];

/// Translates a semester code into the label the results service expects.
///
/// Total over all inputs: anything outside `"1"..="8"` (including `""`,
/// `"03"` or `" 3"`) maps to the empty label rather than an error.
#[must_use]
pub fn translate(code: &str) -> &'static str {
    match code {
        "1" => "Semester-I",
        "2" => "Semester-II",
        "3" => "Semester-III",
        "4" => "Semester-IV",
        "5" => "Semester-V",
        "6" => "Semester-VI",
        "7" => "Semester-VII",
        "8" => "Semester-VIII",
        _ => "",
    }
}
