use crate::normalize::ScorerRecord;
use crate::ranking::COLUMNS;

/// Renders ranked scorers as a right-aligned plain-text table, one row per
/// line, headed by [`COLUMNS`].
pub fn render(records: &[ScorerRecord]) -> String {
    let rows = records.iter().map(cells).collect::<Vec<_>>();

    let mut widths = COLUMNS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, COLUMNS.iter().copied(), &widths);
    for row in &rows {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn cells(r: &ScorerRecord) -> [String; 9] {
    [
        r.position.to_string(),
        r.player.clone(),
        r.club.clone(),
        r.total_goals.to_string(),
        r.penalty_goals.to_string(),
        r.assists.to_string(),
        r.matches.to_string(),
        r.mins.to_string(),
        r.age.to_string(),
    ]
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize; 9]) {
    let line = cells
        .zip(widths.iter())
        .map(|(cell, &width)| format!("{cell:>width$}"))
        .collect::<Vec<_>>()
        .join(" ");
    out.push_str(&line);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_align_to_widest_cell() {
        let rows = vec![ScorerRecord {
            position: 1,
            player: "E. Haaland".to_string(),
            club: "Manchester City".to_string(),
            total_goals: 27,
            penalty_goals: 7,
            assists: 5,
            matches: 31,
            mins: 2575,
            age: 23,
        }];
        let text = render(&rows);
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), lines[1].len());
        assert!(lines[0].starts_with("position     player            club"));
        assert!(lines[1].ends_with("31 2575  23"));
    }

    #[test]
    fn empty_table_is_header_only() {
        assert_eq!(render(&[]).lines().count(), 1);
    }
}
