//! Statistics module - per-game aggregation of score entries
//!
//! Gameplay never reads these numbers; they only feed the end-of-session
//! report.

use std::fmt;

use crate::scoring::{ScoreEntry, ScoreKind};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statistics {
    /// Count per entry kind. Drop holds total hard-drop height; combo and
    /// back-to-back hold their longest streak.
    counts: [u32; ScoreKind::COUNT],
    cleared: u32,
    clear_score: u64,
    perfect_clears: u32,
    perfect_clear_score: u64,
    combo_score: u64,
    back_to_back_score: u64,
}

impl Statistics {
    pub fn collect(&mut self, entry: &ScoreEntry) {
        let slot = &mut self.counts[entry.kind.index()];
        match entry.kind {
            ScoreKind::Drop => *slot += entry.score,
            ScoreKind::Combo => {
                *slot = (*slot).max(entry.count);
                self.combo_score += entry.score as u64;
            }
            ScoreKind::BackToBack => {
                *slot = (*slot).max(entry.count);
                self.back_to_back_score += entry.score as u64;
            }
            _ => *slot += 1,
        }

        let lines = entry.lines();
        if lines > 0 {
            self.cleared += lines;
            self.clear_score += entry.score as u64;
        }
        if entry.kind.is_perfect_clear() {
            self.perfect_clears += 1;
            self.perfect_clear_score += entry.score as u64;
        }
    }

    /// Count recorded for `kind` (see the field docs for Drop and streaks).
    pub fn count(&self, kind: ScoreKind) -> u32 {
        self.counts[kind.index()]
    }

    pub fn cleared_lines(&self) -> u32 {
        self.cleared
    }

    pub fn clear_score(&self) -> u64 {
        self.clear_score
    }

    pub fn perfect_clears(&self) -> u32 {
        self.perfect_clears
    }

    pub fn perfect_clear_score(&self) -> u64 {
        self.perfect_clear_score
    }

    pub fn longest_combo(&self) -> u32 {
        self.count(ScoreKind::Combo)
    }

    pub fn combo_score(&self) -> u64 {
        self.combo_score
    }

    pub fn longest_back_to_back(&self) -> u32 {
        self.count(ScoreKind::BackToBack)
    }

    pub fn back_to_back_score(&self) -> u64 {
        self.back_to_back_score
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ScoreKind::*;
        let c = |kind| self.count(kind);

        writeln!(f, "[ LANDING ]")?;
        writeln!(f, "  * pieces landed: {}", c(Land))?;
        writeln!(f, "  * hard drop height: {} rows", c(Drop))?;
        writeln!(f)?;
        writeln!(f, "[ LINE CLEARS ]")?;
        writeln!(f, "  * lines cleared: {}", self.cleared)?;
        writeln!(f, "  * clear score: {}", self.clear_score)?;
        writeln!(
            f,
            "  * single: {} / t-spin: {} / mini: {}",
            c(Single),
            c(SpinSingle),
            c(SpinMiniSingle)
        )?;
        writeln!(
            f,
            "  * double: {} / t-spin: {} / mini: {}",
            c(Double),
            c(SpinDouble),
            c(SpinMiniDouble)
        )?;
        writeln!(f, "  * triple: {} / t-spin: {}", c(Triple), c(SpinTriple))?;
        writeln!(f, "  * tetris: {}", c(Tetris))?;
        writeln!(f)?;
        writeln!(f, "[ PERFECT CLEARS ]")?;
        writeln!(f, "  * perfect clears: {}", self.perfect_clears)?;
        writeln!(f, "  * perfect clear score: {}", self.perfect_clear_score)?;
        writeln!(
            f,
            "  * single: {} / double: {} / triple: {} / tetris: {} / back-to-back: {}",
            c(PerfectSingle),
            c(PerfectDouble),
            c(PerfectTriple),
            c(PerfectTetris),
            c(PerfectBackToBack)
        )?;
        writeln!(f)?;
        writeln!(f, "[ OTHER ]")?;
        writeln!(f, "  * longest combo: {}", self.longest_combo())?;
        writeln!(f, "  * combo score: {}", self.combo_score)?;
        writeln!(f, "  * longest back-to-back: {}", self.longest_back_to_back())?;
        writeln!(f, "  * back-to-back score: {}", self.back_to_back_score)?;
        writeln!(f, "  * t-spin mini zero: {}", c(SpinMiniZero))?;
        write!(f, "  * t-spin zero: {}", c(SpinZero))
    }
}
