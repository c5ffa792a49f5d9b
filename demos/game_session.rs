//! Game Session
//!
//! The scene flow of a game: splash screen, menu, loading, in-game, and
//! pause. Each scene owns a targetless `update` reaction that redraws it
//! while active, so the per-frame dispatch is a single `push_event` and
//! the machine routes it to whichever scene currently holds the screen.
//!
//! Run with: cargo run --example game_session

use strata::{Machine, StateBuilder, TransitionBuilder};

/// A scene redraws itself on every `update` while it is active.
fn scene(name: &str, redraw: &'static str) -> StateBuilder {
    StateBuilder::new(name).on_event("update", move || println!("  {redraw}"))
}

fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Game Session ===\n");

    let mut session = Machine::builder()
        .state(
            scene("splashscreen", "splash: studio logo fades in")
                .initial()
                .transition(TransitionBuilder::new().on("splash_done").to("menu")),
        )
        .state(
            scene("menu", "menu: [new game] [load game] [quit]")
                .transition(
                    TransitionBuilder::new()
                        .on("new_game")
                        .to("loading")
                        .action(|| println!("  preparing a fresh save")),
                )
                .transition(
                    TransitionBuilder::new()
                        .on("load_game")
                        .to("loading")
                        .action(|| println!("  reading the latest save")),
                ),
        )
        .state(
            scene("loading", "loading: spinner turns")
                .transition(TransitionBuilder::new().on("loaded").to("ingame")),
        )
        .state(
            scene("ingame", "game: world simulates")
                .transition(TransitionBuilder::new().on("pause").to("paused")),
        )
        .state(
            scene("paused", "pause: [resume] [quit to menu]")
                .transition(TransitionBuilder::new().on("resume").to("ingame"))
                .transition(TransitionBuilder::new().on("quit").to("menu")),
        )
        .build()
        .expect("session topology is valid");

    session.enter();

    let script = [
        "update",
        "splash_done",
        "update",
        "new_game",
        "update",
        "loaded",
        "update",
        "update",
        "pause",
        "update",
        "resume",
        "update",
        "quit",
        "update",
    ];

    for command in script {
        println!("> {command}");
        session.push_event(command);
    }

    session.leave();
    println!("\nsession over");

    println!("\n=== Walkthrough Complete ===");
}
