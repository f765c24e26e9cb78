use crate::domain::models::{AppError, EditOutcome, Paragraph, TimingRules};
use crate::domain::time::TimeValue;

#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    paragraphs: Vec<Paragraph>,
    index: usize,
    rules: TimingRules,
}

impl Timeline {
    pub fn new(rules: TimingRules) -> Self {
        Self::from_paragraphs(Vec::new(), rules)
    }

    pub fn from_paragraphs(paragraphs: Vec<Paragraph>, rules: TimingRules) -> Self {
        let mut timeline = Self {
            paragraphs,
            index: 0,
            rules,
        };
        timeline.ensure_not_empty();
        timeline
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    pub fn rules(&self) -> TimingRules {
        self.rules
    }

    pub fn set_rules(&mut self, rules: TimingRules) {
        self.rules = rules;
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> &Paragraph {
        &self.paragraphs[self.index]
    }

    pub fn get(&self, index: usize) -> Option<&Paragraph> {
        self.paragraphs.get(index)
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.paragraphs.len()
    }

    /// Moves paragraph `index` to `new_start` keeping its duration, drags the
    /// touching run behind it along, then normalizes.
    pub fn set_start(
        &mut self,
        index: usize,
        new_start: TimeValue,
    ) -> Result<EditOutcome, AppError> {
        self.check_index(index)?;
        let before = self.paragraphs.clone();
        self.cascade_start(index, new_start.canonical());
        self.normalize();
        Ok(self.outcome_since(&before))
    }

    /// Resizes paragraph `index` to end at `new_end`; the touching run behind
    /// it shifts by the same amount.
    pub fn set_end(&mut self, index: usize, new_end: TimeValue) -> Result<EditOutcome, AppError> {
        self.check_index(index)?;
        let before = self.paragraphs.clone();
        self.cascade_end(index, new_end.canonical());
        self.normalize();
        Ok(self.outcome_since(&before))
    }

    pub fn nudge_start(&mut self, index: usize, delta_ms: i64) -> Result<EditOutcome, AppError> {
        self.check_index(index)?;
        let target = self.paragraphs[index].start.add_millis(delta_ms);
        self.set_start(index, target)
    }

    pub fn nudge_end(&mut self, index: usize, delta_ms: i64) -> Result<EditOutcome, AppError> {
        self.check_index(index)?;
        let target = self.paragraphs[index].end.add_millis(delta_ms);
        self.set_end(index, target)
    }

    /// Single left-to-right pass: stretch short paragraphs to the minimum
    /// duration and push overlapping ones behind their predecessor.
    pub fn fix_timing(&mut self) -> EditOutcome {
        let before = self.paragraphs.clone();
        self.normalize();
        self.outcome_since(&before)
    }

    pub fn join(&mut self, index: usize) -> Result<EditOutcome, AppError> {
        self.check_index(index)?;
        if index == 0 {
            return Ok(EditOutcome::Unchanged);
        }
        let previous_end = self.paragraphs[index - 1].end;
        self.set_start(index, previous_end)
    }

    /// Steps the cursor forward. On the last paragraph a fresh placeholder
    /// is appended, but only once the current one has real text.
    pub fn advance(&mut self) -> EditOutcome {
        if !self.is_last() {
            self.index += 1;
            return EditOutcome::Unchanged;
        }
        let previous = &self.paragraphs[self.index];
        if !previous.is_valid() {
            return EditOutcome::Unchanged;
        }
        let start = previous.end;
        let end = start
            .add_millis(self.rules.default_duration_ms as i64)
            .canonical();
        self.paragraphs.push(Paragraph::placeholder(start, end));
        self.index = self.paragraphs.len() - 1;
        EditOutcome::Changed
    }

    pub fn retreat(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn select(&mut self, index: usize) -> Result<(), AppError> {
        self.check_index(index)?;
        self.index = index;
        Ok(())
    }

    pub fn set_text(&mut self, index: usize, text: &str) -> Result<EditOutcome, AppError> {
        self.check_index(index)?;
        let paragraph = &mut self.paragraphs[index];
        if paragraph.text == text {
            return Ok(EditOutcome::Unchanged);
        }
        paragraph.text = text.to_string();
        Ok(EditOutcome::Changed)
    }

    pub fn remove(&mut self, index: usize) -> Result<EditOutcome, AppError> {
        self.check_index(index)?;
        self.paragraphs.remove(index);
        if index < self.index {
            self.index -= 1;
        }
        self.ensure_not_empty();
        Ok(EditOutcome::Changed)
    }

    pub fn remove_and_collapse(&mut self, index: usize) -> Result<EditOutcome, AppError> {
        self.check_index(index)?;
        if index + 1 < self.paragraphs.len() {
            let new_start = if index > 0 {
                self.paragraphs[index - 1].end
            } else {
                TimeValue::ZERO
            };
            self.cascade_start(index + 1, new_start);
        }
        self.paragraphs.remove(index);
        if index < self.index {
            self.index -= 1;
        }
        self.normalize();
        self.ensure_not_empty();
        Ok(EditOutcome::Changed)
    }

    pub fn locate(&self, position: TimeValue) -> Option<usize> {
        self.paragraphs
            .iter()
            .rposition(|paragraph| paragraph.start <= position)
    }

    pub fn clamp_index(&mut self) {
        self.index = self.index.min(self.paragraphs.len().saturating_sub(1));
    }

    fn check_index(&self, index: usize) -> Result<(), AppError> {
        if index >= self.paragraphs.len() {
            return Err(AppError::Index {
                index,
                count: self.paragraphs.len(),
            });
        }
        Ok(())
    }

    fn ensure_not_empty(&mut self) {
        if self.paragraphs.is_empty() {
            let end = TimeValue::from_millis(self.rules.default_duration_ms).canonical();
            self.paragraphs.push(Paragraph::placeholder(TimeValue::ZERO, end));
            self.index = 0;
        }
        self.clamp_index();
    }

    fn cascade_start(&mut self, index: usize, new_start: TimeValue) {
        let paragraph = &mut self.paragraphs[index];
        let old_end = paragraph.end;
        paragraph.move_start(new_start);
        let new_end = paragraph.end;
        self.propagate(index + 1, old_end, new_end);
    }

    fn cascade_end(&mut self, index: usize, new_end: TimeValue) {
        let paragraph = &mut self.paragraphs[index];
        let old_end = paragraph.end;
        paragraph.end = new_end;
        self.propagate(index + 1, old_end, new_end);
    }

    // Exact equality only: a run ends at the first paragraph that does not
    // start precisely where its predecessor used to end.
    fn propagate(&mut self, from: usize, mut old_end: TimeValue, mut new_end: TimeValue) {
        for paragraph in self.paragraphs.iter_mut().skip(from) {
            if paragraph.start != old_end {
                break;
            }
            let shift = new_end - old_end;
            old_end = paragraph.end;
            let shifted = paragraph.start.add_millis(shift);
            paragraph.move_start(shifted);
            new_end = paragraph.end;
        }
    }

    fn normalize(&mut self) {
        let min_duration = self.rules.min_duration_ms as i64;
        let mut previous_end: Option<TimeValue> = None;
        for paragraph in &mut self.paragraphs {
            let duration = paragraph.duration_ms().max(min_duration);
            if let Some(previous_end) = previous_end {
                if paragraph.start < previous_end {
                    paragraph.start = previous_end;
                }
            }
            paragraph.end = paragraph.start.add_millis(duration);
            previous_end = Some(paragraph.end);
        }
    }

    fn outcome_since(&self, before: &[Paragraph]) -> EditOutcome {
        if self.paragraphs.as_slice() == before {
            EditOutcome::Unchanged
        } else {
            EditOutcome::Changed
        }
    }
}
