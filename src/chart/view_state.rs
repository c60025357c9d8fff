/// Time-selection state of one flow-map instance.
///
/// Created when data arrives, mutated by the playback controller and by direct selection,
/// dropped with the chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewState {
    pub selected_year: i32,
    pub is_playing: bool,
    /// Inclusive `(min, max)`.
    pub year_range: (i32, i32),
}

impl ViewState {
    /// Paused at the first year of `year_range`.
    pub fn new(year_range: (i32, i32)) -> Self {
        let (a, b) = year_range;
        let year_range = (a.min(b), a.max(b));
        Self {
            selected_year: year_range.0,
            is_playing: false,
            year_range,
        }
    }

    /// Select `year`, clamped into the range. Returns the year actually selected.
    pub fn select_year(&mut self, year: i32) -> i32 {
        self.selected_year = year.clamp(self.year_range.0, self.year_range.1);
        self.selected_year
    }

    /// Step one year forward, wrapping from the last year back to the first.
    pub fn step_year(&mut self) -> i32 {
        let (min, max) = self.year_range;
        self.selected_year = if self.selected_year >= max {
            min
        } else {
            self.selected_year + 1
        };
        self.selected_year
    }
}
