//! Scoring module - typed score entries, the recent-events feed and the
//! per-lock scoring pipeline
//!
//! Every award is a [`ScoreEntry`]. Entries are added to the running total,
//! collected by [`Statistics`], and (when they carry a description) pushed to
//! the front of the bounded [`Feed`].

use arrayvec::ArrayVec;

use crate::stats::Statistics;
use crate::types::{SpinKind, Tier, COMBO_BASE, FEED_LEN, LAND_SCORE};

/// Kind of a score entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreKind {
    Drop,
    Land,
    Single,
    Double,
    Triple,
    Tetris,
    SpinMiniZero,
    SpinMiniSingle,
    SpinMiniDouble,
    SpinZero,
    SpinSingle,
    SpinDouble,
    SpinTriple,
    PerfectSingle,
    PerfectDouble,
    PerfectTriple,
    PerfectTetris,
    PerfectBackToBack,
    Combo,
    BackToBack,
}

impl ScoreKind {
    pub const COUNT: usize = 20;

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Lines a primary entry of this kind clears.
    pub fn lines(&self) -> u32 {
        match self {
            ScoreKind::Single | ScoreKind::SpinMiniSingle | ScoreKind::SpinSingle => 1,
            ScoreKind::Double | ScoreKind::SpinMiniDouble | ScoreKind::SpinDouble => 2,
            ScoreKind::Triple | ScoreKind::SpinTriple => 3,
            ScoreKind::Tetris => 4,
            _ => 0,
        }
    }

    pub fn is_perfect_clear(&self) -> bool {
        matches!(
            self,
            ScoreKind::PerfectSingle
                | ScoreKind::PerfectDouble
                | ScoreKind::PerfectTriple
                | ScoreKind::PerfectTetris
                | ScoreKind::PerfectBackToBack
        )
    }

    /// Feed label, `None` for entries that never reach the feed.
    pub fn label(&self) -> Option<&'static str> {
        Some(match self {
            ScoreKind::Drop | ScoreKind::Land => return None,
            ScoreKind::Single => "SINGLE",
            ScoreKind::Double => "DOUBLE",
            ScoreKind::Triple => "TRIPLE",
            ScoreKind::Tetris => "TETRIS",
            ScoreKind::SpinMiniZero => "T SPIN MINI ZERO",
            ScoreKind::SpinMiniSingle => "T SPIN MINI SINGLE",
            ScoreKind::SpinMiniDouble => "T SPIN MINI DOUBLE",
            ScoreKind::SpinZero => "T SPIN ZERO",
            ScoreKind::SpinSingle => "T SPIN SINGLE",
            ScoreKind::SpinDouble => "T SPIN DOUBLE",
            ScoreKind::SpinTriple => "T SPIN TRIPLE",
            ScoreKind::PerfectSingle => "PERFECT CLEAR SINGLE",
            ScoreKind::PerfectDouble => "PERFECT CLEAR DOUBLE",
            ScoreKind::PerfectTriple => "PERFECT CLEAR TRIPLE",
            ScoreKind::PerfectTetris => "PERFECT CLEAR TETRIS",
            ScoreKind::PerfectBackToBack => "PERFECT CLEAR BACK-TO-BACK",
            ScoreKind::Combo => "COMBO",
            ScoreKind::BackToBack => "BACK-TO-BACK",
        })
    }
}

/// A single award.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreEntry {
    pub kind: ScoreKind,
    pub score: u32,
    /// Streak length for combo and back-to-back entries, 0 otherwise
    pub count: u32,
}

impl ScoreEntry {
    fn of(kind: ScoreKind, score: u32) -> Self {
        Self {
            kind,
            score,
            count: 0,
        }
    }

    /// Hard drop over `height` rows.
    pub fn drop(height: u32) -> Self {
        Self::of(ScoreKind::Drop, height)
    }

    pub fn land() -> Self {
        Self::of(ScoreKind::Land, LAND_SCORE)
    }

    /// Plain line clear of 1..=4 lines.
    pub fn line_clear(lines: usize) -> Option<Self> {
        let (kind, score) = match lines {
            1 => (ScoreKind::Single, 100),
            2 => (ScoreKind::Double, 300),
            3 => (ScoreKind::Triple, 500),
            4 => (ScoreKind::Tetris, 800),
            _ => return None,
        };
        Some(Self::of(kind, score))
    }

    /// Spin entry for `lines` cleared.
    ///
    /// A mini spin past two lines scores as full; four lines always score as
    /// a plain Tetris.
    pub fn spin(spin: SpinKind, lines: usize) -> Option<Self> {
        let (kind, score) = match (spin, lines) {
            (SpinKind::None, _) => return None,
            (_, 4) => return Self::line_clear(4),
            (SpinKind::Mini, 0) => (ScoreKind::SpinMiniZero, 100),
            (SpinKind::Mini, 1) => (ScoreKind::SpinMiniSingle, 200),
            (SpinKind::Mini, 2) => (ScoreKind::SpinMiniDouble, 400),
            (_, 0) => (ScoreKind::SpinZero, 400),
            (_, 1) => (ScoreKind::SpinSingle, 800),
            (_, 2) => (ScoreKind::SpinDouble, 1200),
            (_, 3) => (ScoreKind::SpinTriple, 1600),
            _ => return None,
        };
        Some(Self::of(kind, score))
    }

    /// Perfect clear bonus for `lines`, or the back-to-back tier.
    pub fn perfect_clear(lines: usize, back_to_back: bool) -> Option<Self> {
        if back_to_back {
            return Some(Self::of(ScoreKind::PerfectBackToBack, 3200));
        }
        let (kind, score) = match lines {
            1 => (ScoreKind::PerfectSingle, 800),
            2 => (ScoreKind::PerfectDouble, 1200),
            3 => (ScoreKind::PerfectTriple, 1800),
            4 => (ScoreKind::PerfectTetris, 2000),
            _ => return None,
        };
        Some(Self::of(kind, score))
    }

    pub fn combo(count: u32) -> Self {
        Self {
            kind: ScoreKind::Combo,
            score: COMBO_BASE * count,
            count,
        }
    }

    /// Back-to-back bonus: half the primary entry's (already scaled) score.
    pub fn back_to_back(primary: u32, count: u32) -> Self {
        Self {
            kind: ScoreKind::BackToBack,
            score: primary / 2,
            count,
        }
    }

    /// Apply the gravity multiplier.
    pub fn scaled(mut self, multiplier: u32) -> Self {
        self.score = self.score.saturating_mul(multiplier);
        self
    }

    pub fn lines(&self) -> u32 {
        self.kind.lines()
    }

    pub fn tier(&self) -> Tier {
        match self.kind {
            ScoreKind::Double | ScoreKind::SpinMiniSingle | ScoreKind::SpinMiniDouble => {
                Tier::Silver
            }
            ScoreKind::Triple
            | ScoreKind::Tetris
            | ScoreKind::SpinSingle
            | ScoreKind::SpinDouble
            | ScoreKind::SpinTriple => Tier::Gold,
            kind if kind.is_perfect_clear() => Tier::Aqua,
            ScoreKind::Combo => match self.count {
                c if c >= 20 => Tier::Aqua,
                c if c >= 15 => Tier::Gold,
                c if c >= 10 => Tier::Silver,
                _ => Tier::Plain,
            },
            _ => Tier::Plain,
        }
    }

    /// Feed text, e.g. `TETRIS +800` or `COMBO ×3 +150`.
    pub fn description(&self) -> Option<String> {
        let label = self.kind.label()?;
        Some(match self.kind {
            ScoreKind::Combo => format!("{} ×{} +{}", label, self.count, self.score),
            _ => format!("{} +{}", label, self.score),
        })
    }
}

/// One line of the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub text: String,
    pub tier: Tier,
}

/// Recent scoring events, newest first.
#[derive(Debug, Clone, Default)]
pub struct Feed {
    entries: ArrayVec<FeedEntry, FEED_LEN>,
    /// Bumped on every change so presenters can skip unchanged feeds
    revision: u64,
}

impl Feed {
    pub fn push(&mut self, entry: FeedEntry) {
        if self.entries.is_full() {
            self.entries.pop();
        }
        self.entries.insert(0, entry);
        self.revision += 1;
    }

    pub fn entries(&self) -> &[FeedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.revision += 1;
    }
}

/// What the scoring pipeline needs to know about a lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockScoring {
    pub cleared: usize,
    pub spin: SpinKind,
    /// Occupied cells left on the grid after the clear
    pub occupied_after: usize,
    /// Gravity after this lock's leveling step
    pub gravity: u8,
}

/// Running score, streaks, feed and statistics for one game.
#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    score: u64,
    /// 0 = no active combo streak
    combo: u32,
    /// 0 = no active back-to-back streak
    back_to_back: u32,
    feed: Feed,
    statistics: Statistics,
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn back_to_back(&self) -> u32 {
        self.back_to_back
    }

    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Record an entry and return the points it added.
    pub fn add(&mut self, entry: ScoreEntry) -> u32 {
        self.statistics.collect(&entry);
        self.score += entry.score as u64;
        if let Some(text) = entry.description() {
            self.feed.push(FeedEntry {
                text,
                tier: entry.tier(),
            });
        }
        entry.score
    }

    /// Run the per-lock pipeline and return the points it added.
    ///
    /// Order: land, primary, perfect clear, back-to-back, combo.
    pub fn score_lock(&mut self, lock: LockScoring) -> u64 {
        let before = self.score;
        let multiplier = lock.gravity as u32 + 1;
        let cleared = lock.cleared;

        self.add(ScoreEntry::land());

        if cleared > 0 || lock.spin.is_spin() {
            let primary = ScoreEntry::spin(lock.spin, cleared)
                .or_else(|| ScoreEntry::line_clear(cleared));
            let primary = primary.map(|entry| entry.scaled(multiplier));
            if let Some(entry) = primary {
                self.add(entry);
            }

            if lock.occupied_after == 0 && cleared > 0 {
                let after_tetris = matches!(primary, Some(p) if p.kind == ScoreKind::Tetris);
                let bonus =
                    ScoreEntry::perfect_clear(cleared, after_tetris && self.back_to_back > 0);
                if let Some(entry) = bonus {
                    self.add(entry.scaled(multiplier));
                }
            }

            let difficult = cleared >= 4 || (lock.spin.is_spin() && cleared >= 1);
            if difficult {
                if self.back_to_back > 0 {
                    let primary_score = primary.map_or(0, |p| p.score);
                    self.add(ScoreEntry::back_to_back(primary_score, self.back_to_back));
                }
                self.back_to_back += 1;
            } else if cleared > 0 {
                self.back_to_back = 0;
            }
        }

        if cleared > 0 {
            if self.combo > 0 {
                self.add(ScoreEntry::combo(self.combo).scaled(multiplier));
                self.combo += 1;
            } else {
                self.combo = 1;
            }
        } else {
            self.combo = 0;
        }

        self.score - before
    }

    pub fn reset(&mut self) {
        self.score = 0;
        self.combo = 0;
        self.back_to_back = 0;
        self.feed.clear();
        self.statistics.reset();
    }
}
