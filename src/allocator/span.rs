use super::{EligibleRows, Pick};
use crate::models::{RowNumber, SeatNumber};

/// Результат жадного прохода по подряд идущим рядам от одного стартового ряда.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanCandidate {
    pub start: RowNumber,
    /// Последний посещённый ряд минус стартовый плюс один
    pub span: u32,
    pub picks: Vec<Pick>,
}

impl SpanCandidate {
    fn count(&self) -> usize {
        self.picks.len()
    }
}

/// Перебирает все стартовые ряды и возвращает лучший отрезок.
///
/// Полный набор (`target` мест): минимальный `span`, при равенстве меньший стартовый ряд.
/// Если полного набора нет ни от одного старта, возвращается лучший частичный:
/// больше мест, затем меньший `span`, затем меньший стартовый ряд.
pub fn find(rows: &EligibleRows, target: usize) -> Option<SpanCandidate> {
    if target == 0 {
        return None;
    }

    let ordered: Vec<(RowNumber, &[SeatNumber])> = rows
        .iter()
        .map(|(row, seats)| (*row, seats.as_slice()))
        .collect();

    let mut best_full: Option<SpanCandidate> = None;
    let mut best_partial: Option<SpanCandidate> = None;

    // Старты идут по возрастанию, поэтому строгое сравнение оставляет меньший ряд при равенстве
    for start in 0..ordered.len() {
        let candidate = walk(&ordered[start..], target);

        if candidate.count() == target {
            if best_full.as_ref().map_or(true, |best| candidate.span < best.span) {
                best_full = Some(candidate);
            }
        } else if candidate.count() > 0 {
            let better = best_partial.as_ref().map_or(true, |best| {
                candidate.count() > best.count()
                    || (candidate.count() == best.count() && candidate.span < best.span)
            });
            if better {
                best_partial = Some(candidate);
            }
        }
    }

    best_full.or(best_partial)
}

/// Жадно набирает места с первого ряда `run`, пока не наберётся `target`,
/// не кончатся ряды или не встретится разрыв в нумерации.
pub fn walk(run: &[(RowNumber, &[SeatNumber])], target: usize) -> SpanCandidate {
    let start = run.first().map(|(row, _)| *row).unwrap_or_default();
    let mut last = start;
    let mut picks = Vec::with_capacity(target);

    for (idx, (row, seats)) in run.iter().enumerate() {
        if picks.len() >= target {
            break;
        }
        if idx > 0 && last.checked_add(1) != Some(*row) {
            break;
        }

        let take = (target - picks.len()).min(seats.len());
        picks.extend(seats[..take].iter().map(|seat| (*row, *seat)));
        last = *row;
    }

    SpanCandidate {
        start,
        span: last - start + 1,
        picks,
    }
}
