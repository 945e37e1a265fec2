use shotcore::processing::GameStateSummary;
use std::fmt::Write;

const COLUMNS: [&str; 7] = [
    "Game State",
    "Total Shots",
    "Total xG",
    "Total Goals",
    "Distance From Goal",
    "xG Overperformance",
    "xG O/P per Shot",
];

fn cells(row: &GameStateSummary) -> [String; 7] {
    [
        row.game_state.clone(),
        row.total_shots.to_string(),
        format!("{:.2}", row.total_xg),
        row.total_goals.to_string(),
        format!("{:.2}", row.distance_from_goal),
        format!("{:.2}", row.xg_overperformance),
        format!("{:.3}", row.xg_overperformance_per_shot),
    ]
}

/// Aligned text rendition of the game-state comparison table.
pub fn summary_table(rows: &[GameStateSummary]) -> String {
    let body: Vec<[String; 7]> = rows.iter().map(cells).collect();
    let mut widths = COLUMNS.map(str::len);
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = COLUMNS
        .iter()
        .zip(widths)
        .map(|(name, width)| format!("{:<width$}", name, width = width))
        .collect();
    let _ = writeln!(out, "{}", header.join(" | ").trim_end());
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    let _ = writeln!(out, "{}", rule.join("-+-"));

    for row in &body {
        let line: Vec<String> = row
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(column, (cell, width))| {
                if column == 0 {
                    format!("{:<width$}", cell, width = width)
                } else {
                    format!("{:>width$}", cell, width = width)
                }
            })
            .collect();
        let _ = writeln!(out, "{}", line.join(" | "));
    }
    out
}
