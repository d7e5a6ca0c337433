use std::cmp::Reverse;

use crate::normalize::ScorerRecord;

/// Output column order, shared by the console table and the stored table.
pub const COLUMNS: [&str; 9] = [
    "position",
    "player",
    "club",
    "total_goals",
    "penalty_goals",
    "assists",
    "matches",
    "mins",
    "age",
];

/// Orders scorers by goals then assists (both descending) and assigns dense
/// positions by goals. Ties in both keys keep their input order.
pub fn rank(mut records: Vec<ScorerRecord>) -> Vec<ScorerRecord> {
    records.sort_by_key(|r| (Reverse(r.total_goals), Reverse(r.assists)));

    let goals = records.iter().map(|r| r.total_goals).collect::<Vec<_>>();
    for (record, position) in records.iter_mut().zip(dense_positions(&goals)) {
        record.position = position;
    }
    records
}

/// Dense ranks for goal totals already sorted in descending order.
pub fn dense_positions(sorted_goals: &[i32]) -> Vec<u32> {
    let mut out = Vec::with_capacity(sorted_goals.len());
    let mut position = 0u32;
    let mut prev = None;
    for &goals in sorted_goals {
        if prev != Some(goals) {
            position += 1;
            prev = Some(goals);
        }
        out.push(position);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer(player: &str, total_goals: i32, assists: i32) -> ScorerRecord {
        ScorerRecord {
            position: 0,
            player: player.to_string(),
            club: "Club".to_string(),
            total_goals,
            penalty_goals: 0,
            assists,
            matches: 30,
            mins: 2500,
            age: 25,
        }
    }

    #[test]
    fn dense_positions_collapse_ties() {
        assert_eq!(
            dense_positions(&[10, 10, 8, 5, 5, 5]),
            vec![1, 1, 2, 3, 3, 3]
        );
        assert!(dense_positions(&[]).is_empty());
    }

    #[test]
    fn rank_sorts_by_goals_then_assists() {
        let ranked = rank(vec![
            scorer("C", 8, 1),
            scorer("A", 10, 2),
            scorer("B", 10, 5),
            scorer("D", 5, 0),
        ]);
        let order = ranked.iter().map(|r| r.player.as_str()).collect::<Vec<_>>();
        assert_eq!(order, ["B", "A", "C", "D"]);
        let positions = ranked.iter().map(|r| r.position).collect::<Vec<_>>();
        assert_eq!(positions, [1, 1, 2, 3]);
    }

    #[test]
    fn rank_is_stable_for_full_ties() {
        let ranked = rank(vec![
            scorer("first", 7, 3),
            scorer("top", 9, 0),
            scorer("second", 7, 3),
            scorer("third", 7, 3),
        ]);
        let order = ranked.iter().map(|r| r.player.as_str()).collect::<Vec<_>>();
        assert_eq!(order, ["top", "first", "second", "third"]);
        assert!(ranked[1..].iter().all(|r| r.position == 2));
    }

    #[test]
    fn position_never_decreases_down_the_table() {
        let ranked = rank(
            [3, 11, 3, 0, 7, 11, 2]
                .iter()
                .enumerate()
                .map(|(i, g)| scorer(&format!("p{i}"), *g, 0))
                .collect(),
        );
        for pair in ranked.windows(2) {
            assert!(pair[0].total_goals >= pair[1].total_goals);
            assert!(pair[0].position <= pair[1].position);
        }
        assert_eq!(ranked.last().map(|r| r.position), Some(5));
    }
}
