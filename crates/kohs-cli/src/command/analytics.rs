use std::{
    fmt::Write as _,
    io::{self, Write as _},
};

use anyhow::Context;
use kohs_engine::{GameType, SessionRecord};
use kohs_profile::{AnalyticsSummary, GameCatalog};

use crate::{
    command::{GlobalArg, parse_game_type},
    util,
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct AnalyticsArg {
    /// Print the summary as JSON
    #[clap(long)]
    pub(super) json: bool,
    /// Only include sessions of this game (e.g. kohs)
    #[clap(long, value_parser = parse_game_type)]
    pub(super) game: Option<GameType>,
}

pub(super) fn run(global: &GlobalArg, arg: &AnalyticsArg) -> anyhow::Result<()> {
    let AnalyticsArg { json, game } = arg;

    let recorder = global.open_recorder();
    let summary = match game {
        Some(game) => AnalyticsSummary::from_sessions(recorder.sessions_by_game(*game)),
        None => recorder.analytics(),
    };

    let mut stdout = io::stdout().lock();
    if *json {
        serde_json::to_writer_pretty(&mut stdout, &summary)
            .context("Failed to write JSON to stdout")?;
        writeln!(stdout)?;
    } else {
        let report = render_report(recorder.user_id(), *game, &summary);
        stdout
            .write_all(report.as_bytes())
            .context("Failed to write report to stdout")?;
    }
    Ok(())
}

fn render_report(user_id: &str, game: Option<GameType>, summary: &AnalyticsSummary) -> String {
    let mut out = String::new();
    let scope = game.map_or("all games", |game| GameCatalog.get(game).title);
    _ = writeln!(out, "Player: {user_id}");
    _ = writeln!(out, "Scope:  {scope}");
    _ = writeln!(out);

    if summary.total_games == 0 {
        _ = writeln!(out, "No completed games yet. Play one with `kohs play`.");
        return out;
    }

    _ = writeln!(out, "Games completed:   {}", summary.total_games);
    _ = writeln!(out, "Average time:      {}", util::format_time(summary.average_time));
    _ = writeln!(out, "Median time:       {}", util::format_time(summary.median_time));
    _ = writeln!(out, "Fastest time:      {}", util::format_time(summary.fastest_time));
    _ = writeln!(out, "Slowest time:      {}", util::format_time(summary.slowest_time));
    _ = writeln!(out, "Average rotations: {:.1}", summary.average_rotations);
    _ = writeln!(out, "Average drags:     {:.1}", summary.average_drags);
    _ = writeln!(out);
    _ = writeln!(out, "Recent sessions:");
    for session in &summary.recent_sessions {
        _ = writeln!(out, "  {}", render_session(session));
    }
    out
}

fn render_session(session: &SessionRecord) -> String {
    let mut line = format!(
        "{:<18} {:<20} {:<9} {:>8}",
        util::format_date(session.timestamp),
        GameCatalog.get(session.game_type).title,
        session.difficulty.as_str(),
        util::format_time(session.time_seconds),
    );
    if let Some(rotations) = session.rotations {
        _ = write!(line, "  {rotations} rotations");
    }
    if let Some(drags) = session.drags {
        _ = write!(line, "  {drags} drags");
    }
    line
}

#[cfg(test)]
mod tests {
    use kohs_engine::{SessionDifficulty, SessionId};

    use super::*;

    fn record(time_seconds: f64) -> SessionRecord {
        SessionRecord {
            id: SessionId("kohs_1_abc".to_owned()),
            game_type: GameType::Kohs,
            difficulty: SessionDifficulty::Hard,
            timestamp: 1_700_000_000_000,
            completed: true,
            time_seconds,
            rotations: Some(4),
            drags: None,
            errors: None,
        }
    }

    #[test]
    fn test_empty_report() {
        let report = render_report("temp_1_x", None, &AnalyticsSummary::default());
        assert!(report.contains("Player: temp_1_x"));
        assert!(report.contains("No completed games yet"));
    }

    #[test]
    fn test_report_lists_recent_sessions() {
        let sessions = [record(30.0), record(95.0)];
        let summary = AnalyticsSummary::from_sessions(&sessions);
        let report = render_report("u", Some(GameType::Kohs), &summary);

        assert!(report.contains("Scope:  Kohs Block Design"));
        assert!(report.contains("Games completed:   2"));
        assert!(report.contains("Fastest time:      30.0s"));
        assert!(report.contains("Average time:      1m 2s"));
        assert!(report.contains("Median time:       1m 2s"));
        assert!(report.contains("Slowest time:      1m 35s"));
        let recent = report.split("Recent sessions:").nth(1).unwrap();
        assert_eq!(recent.lines().filter(|l| !l.is_empty()).count(), 2);
        assert!(recent.contains("hard"));
        assert!(recent.contains("4 rotations"));
        assert!(!recent.contains("drags"));
    }
}
