use crate::command::GlobalArg;

pub(super) fn run(global: &GlobalArg) {
    let mut recorder = global.open_recorder();
    let removed = recorder.profile().sessions.len();
    recorder.clear_all_data();
    println!(
        "Removed {removed} recorded sessions from {}. New player id: {}",
        recorder.store(),
        recorder.user_id()
    );
}
