pub const BRAND_BAR_COLOR: &str = "#084063";

pub const LEVEL_PALETTE: [&str; 7] = [
    "#3e873c", "#fec749", "#ec6825", "#d0228e", "#97439e", "#00b0bc", "#0087bc",
];

pub const EXPOSURE_PALETTE: [&str; 4] = ["#00b0bc", "#0087bc", "#005d8e", "#084063"];

pub const RELATED_PALETTE: [&str; 4] = ["#3e873c", "#fec749", "#d0228e", "#97439e"];

pub const RANK_HIGHLIGHTS: [&str; 3] = ["#fec749", "#8abe50", "#00b0bc"];

const FALLBACK_COLOR: &str = "#000000";

#[must_use]
pub fn assign_colors<'a, I>(labels: I, palette: &[&'static str]) -> Vec<(String, &'static str)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut assignment: Vec<(String, &'static str)> = Vec::new();
    for label in labels {
        if assignment.iter().any(|(seen, _)| seen == label) {
            continue;
        }
        let color = palette
            .get(assignment.len())
            .or_else(|| palette.last())
            .copied()
            .unwrap_or(FALLBACK_COLOR);
        assignment.push((label.to_string(), color));
    }
    assignment
}

#[must_use]
pub const fn rank_highlight_color(rank: usize) -> Option<&'static str> {
    match rank {
        1 => Some(RANK_HIGHLIGHTS[0]),
        2 => Some(RANK_HIGHLIGHTS[1]),
        3 => Some(RANK_HIGHLIGHTS[2]),
        _ => None,
    }
}
