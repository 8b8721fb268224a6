//! Display composer - per-mode glyph selection
//!
//! A pure function of the game registers and the blink phase. It owns no
//! timing; multiplexing the four rows onto physical digits is left to the
//! renderer.

use crate::obstacles::ObstacleTrack;
use crate::scoring::BcdScore;
use crate::types::{GameMode, Glyph, GlyphBuffer, Lane, DIGIT_COUNT};

/// "LOST", row 0 first (row 3 reads first on the board).
pub const LOST_GLYPHS: GlyphBuffer = [Glyph::LETTER_T, Glyph::LETTER_S, Glyph::LETTER_O, Glyph::LETTER_L];

/// Compose the four glyph rows, index 0 = bottom (player) row.
pub fn compose(
    mode: GameMode,
    score: &BcdScore,
    lane: Lane,
    track: &ObstacleTrack,
    blink_on: bool,
) -> GlyphBuffer {
    match mode {
        GameMode::ScoreIdle => score.digits().map(Glyph::numeral),
        GameMode::Countdown => [Glyph::BLANK; DIGIT_COUNT],
        GameMode::Play => {
            let mut rows = track.rows().map(Glyph::lane_mask);
            rows[0] = player_row(lane, track, blink_on);
            rows
        }
        GameMode::Lost => LOST_GLYPHS,
    }
}

fn player_row(lane: Lane, track: &ObstacleTrack, blink_on: bool) -> Glyph {
    let player = if blink_on {
        Glyph::lane(lane)
    } else {
        Glyph::BLANK
    };
    let bottom = track.bottom();
    if bottom.is_empty() {
        player
    } else {
        player.overlay(Glyph::lane_mask(bottom))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LaneMask;

    fn track_with(rows: [LaneMask; 4]) -> ObstacleTrack {
        let mut t = ObstacleTrack::new();
        for (i, r) in rows.iter().enumerate() {
            t.set_row(i, *r);
        }
        t
    }

    #[test]
    fn score_idle_shows_digits() {
        let out = compose(
            GameMode::ScoreIdle,
            &BcdScore::from_value(1207),
            Lane::Middle,
            &ObstacleTrack::new(),
            true,
        );
        assert_eq!(
            out,
            [
                Glyph::numeral(7),
                Glyph::numeral(0),
                Glyph::numeral(2),
                Glyph::numeral(1)
            ]
        );
    }

    #[test]
    fn countdown_is_blank() {
        let out = compose(
            GameMode::Countdown,
            &BcdScore::from_value(55),
            Lane::Left,
            &track_with([LaneMask::from_lane(Lane::Left); 4]),
            true,
        );
        assert!(out.iter().all(Glyph::is_blank));
    }

    #[test]
    fn lost_ignores_state() {
        let out = compose(
            GameMode::Lost,
            &BcdScore::from_value(9999),
            Lane::Right,
            &track_with([LaneMask::from_lane(Lane::Right); 4]),
            false,
        );
        assert_eq!(out, LOST_GLYPHS);
    }

    #[test]
    fn play_shows_obstacles_and_blinking_player() {
        let track = track_with([
            LaneMask::EMPTY,
            LaneMask::from_lane(Lane::Left),
            LaneMask::EMPTY,
            LaneMask::from_lane(Lane::Right),
        ]);
        let on = compose(GameMode::Play, &BcdScore::new(), Lane::Middle, &track, true);
        assert_eq!(on[0], Glyph::lane(Lane::Middle));
        assert_eq!(on[1], Glyph::lane(Lane::Left));
        assert!(on[2].is_blank());
        assert_eq!(on[3], Glyph::lane(Lane::Right));

        let off = compose(GameMode::Play, &BcdScore::new(), Lane::Middle, &track, false);
        assert!(off[0].is_blank());
        assert_eq!(off[1..], on[1..]);
    }

    #[test]
    fn bottom_obstacle_combines_with_player() {
        let track = track_with([
            LaneMask::from_lane(Lane::Right),
            LaneMask::EMPTY,
            LaneMask::EMPTY,
            LaneMask::EMPTY,
        ]);
        let on = compose(GameMode::Play, &BcdScore::new(), Lane::Left, &track, true);
        assert_eq!(
            on[0],
            Glyph::lane(Lane::Left).overlay(Glyph::lane(Lane::Right))
        );

        let off = compose(GameMode::Play, &BcdScore::new(), Lane::Left, &track, false);
        assert_eq!(off[0], Glyph::lane(Lane::Right));
    }
}
