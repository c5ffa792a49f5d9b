//! Media Player
//!
//! The playback logic of a small media player, adapted to a scripted
//! walkthrough: three states (stopped, playing, paused) decide which
//! buttons the interface shows, and entry/exit callbacks keep the display
//! consistent no matter which transition activated the state.
//!
//! Run with: cargo run --example media_player

use std::sync::{Arc, Mutex};

use strata::{Machine, StateBuilder, TransitionBuilder};

/// The button panel. It only knows how to display what it is told;
/// deciding which buttons make sense in which state is entirely the
/// machine's business.
#[derive(Clone, Default)]
struct Panel {
    inner: Arc<Mutex<PanelState>>,
}

#[derive(Default)]
struct PanelState {
    show_play: bool,
    stop_enabled: bool,
}

impl Panel {
    fn show_play(&self) {
        self.inner.lock().unwrap().show_play = true;
    }

    fn show_pause(&self) {
        self.inner.lock().unwrap().show_play = false;
    }

    fn enable_stop(&self, enabled: bool) {
        self.inner.lock().unwrap().stop_enabled = enabled;
    }

    fn print(&self) {
        let state = self.inner.lock().unwrap();
        let toggle = if state.show_play { "[ > play ]" } else { "[ || pause ]" };
        let stop = if state.stop_enabled { "[ [] stop ]" } else { "[        ]" };
        println!("  panel: {toggle} {stop}");
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Media Player ===\n");

    let panel = Panel::default();

    let on_stopped = {
        let panel = panel.clone();
        move || {
            panel.show_play();
            panel.enable_stop(false);
        }
    };
    let leaving_stopped = {
        let panel = panel.clone();
        move || panel.enable_stop(true)
    };
    let on_playing = {
        let panel = panel.clone();
        move || panel.show_pause()
    };
    let on_paused = {
        let panel = panel.clone();
        move || panel.show_play()
    };

    let mut player = Machine::builder()
        .state(
            StateBuilder::new("stopped")
                .initial()
                .on_entry(on_stopped)
                .on_exit(leaving_stopped)
                .transition(TransitionBuilder::new().on("play").to("playing")),
        )
        .state(
            StateBuilder::new("playing")
                .on_entry(on_playing)
                .transition(TransitionBuilder::new().on("pause").to("paused"))
                .transition(TransitionBuilder::new().on("stop").to("stopped")),
        )
        .state(
            StateBuilder::new("paused")
                .on_entry(on_paused)
                .transition(TransitionBuilder::new().on("play").to("playing"))
                .transition(TransitionBuilder::new().on("stop").to("stopped")),
        )
        .build()
        .expect("player topology is valid");

    player.enter();
    println!("player started");
    panel.print();

    // A "stop" while already stopped simply matches nothing; the machine
    // does not need a transition for it.
    for command in ["play", "pause", "play", "stop", "stop"] {
        println!("\n> {command}");
        player.push_event(command);
        panel.print();
        for state in ["stopped", "playing", "paused"] {
            if player.in_state(state) {
                println!("  now in: {state}");
            }
        }
    }

    player.leave();
    println!("\nplayer shut down, {} trace records kept", player.trace().len());

    println!("\n=== Walkthrough Complete ===");
}
