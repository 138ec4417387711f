//! Plain-text renderings of the element chart and city grids.

use std::fmt::Write as _;

use game_core::{AdventureModeLocation, City, ElementType, Multiplier};
use strum::IntoEnumIterator;

const LABEL_WIDTH: usize = 9;
const CELL_WIDTH: usize = 4;

/// Attacker per row, defender per column. Neutral pairings are left blank.
pub fn element_chart() -> String {
    let mut chart = format!("{:<LABEL_WIDTH$}", "ATK\\DEF");
    for defending in ElementType::iter() {
        let _ = write!(chart, "{:>CELL_WIDTH$}", abbreviation(defending));
    }
    chart.push('\n');

    for attacking in ElementType::iter() {
        let _ = write!(chart, "{:<LABEL_WIDTH$}", attacking.as_ref());
        for defending in ElementType::iter() {
            let cell = match attacking.multiplier_against(defending) {
                Multiplier::Double => "2x",
                Multiplier::Half => "½x",
                Multiplier::Normal => ".",
            };
            let _ = write!(chart, "{cell:>CELL_WIDTH$}");
        }
        chart.push('\n');
    }
    chart
}

fn abbreviation(element: ElementType) -> String {
    element.as_ref().chars().take(3).collect()
}

/// One character per tile: `@` player, `*` someone else, `P` portal,
/// `W` wild grass, `.` plain ground.
pub fn city_map(city: &City, player: AdventureModeLocation) -> String {
    let mut map = format!("{} ({}x{})\n", city.name, city.width(), city.height());
    let mut row = 0;
    for (location, tile) in city.tiles() {
        if location.tile_y != row {
            map.push('\n');
            row = location.tile_y;
        }
        let glyph = if location == player {
            '@'
        } else if tile.is_occupied() {
            '*'
        } else if tile.is_portal() {
            'P'
        } else if tile.can_encounter_wild_battles() {
            'W'
        } else {
            '.'
        };
        map.push(glyph);
    }
    map.push('\n');
    map
}
