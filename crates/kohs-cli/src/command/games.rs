use kohs_profile::GameCatalog;

pub(super) fn run() {
    for game in GameCatalog.games() {
        println!(
            "{:<14} {:<20} {:<12} {}",
            game.game_type.as_str(),
            game.title,
            game.status.to_string(),
            game.description
        );
    }
}
