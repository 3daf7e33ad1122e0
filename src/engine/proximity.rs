use crate::model::Seat;

/// Score on a move across rooms, regardless of seat numbers.
const CROSS_ROOM: f64 = 0.3;

/// How close two seats are, in `[0, 1]`. Same room with numerically adjacent
/// display names scores highest; any cross-room move scores a flat 0.3,
/// heavily penalizing relocation between rooms.
pub fn proximity(a: &Seat, b: &Seat) -> f64 {
    if a.floor_id != b.floor_id {
        return CROSS_ROOM;
    }
    let d = (seat_number(&a.resource_name) - seat_number(&b.resource_name)).abs();
    match d {
        0 => 1.0,
        1..=5 => 0.9,
        6..=10 => 0.8,
        11..=20 => 0.7,
        21..=50 => 0.6,
        _ => 0.5,
    }
}

/// First run of digits in a seat display name; 0 when there is none.
fn seat_number(name: &str) -> i64 {
    let digits: String = name
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}
