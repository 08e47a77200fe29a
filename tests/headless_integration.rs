use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{Event as CtEvent, KeyCode, KeyEvent, KeyModifiers};
use tecla::context::FinishReason;
use tecla::runtime::{map_event, FixedTicker, Runner, TestEventSource, TrainerEvent};
use tecla::{Keystroke, SessionConfig, Text, Trainer};

fn key(c: char) -> TrainerEvent {
    TrainerEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

// Headless integration using the runtime + Trainer without a TTY
#[test]
fn headless_typing_flow_completes() {
    let mut trainer = Trainer::with_text(
        SessionConfig::default(),
        Text::single_line("prompt", "hi", 15),
    );

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    // the terminal side: a paste between two keys goes through the same mapping
    for ev in [
        CtEvent::Key(KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE)),
        CtEvent::Paste("hi".into()),
        CtEvent::Key(KeyEvent::new(KeyCode::Char('i'), KeyModifiers::NONE)),
    ] {
        tx.send(map_event(ev).unwrap()).unwrap();
    }

    let mut pastes = 0;
    for _ in 0..100u32 {
        match runner.step() {
            TrainerEvent::Tick => trainer.on_tick(),
            TrainerEvent::Resize => {}
            TrainerEvent::Paste(chars) => {
                assert_eq!(chars, 2);
                pastes += 1;
            }
            TrainerEvent::Key(key) => {
                if let KeyCode::Char(c) = key.code {
                    trainer.write(c).unwrap();
                    if trainer.has_finished() {
                        break;
                    }
                }
            }
        }
    }

    assert!(trainer.has_finished(), "trainer should have finished typing");
    assert_eq!(pastes, 1);
    let summary = trainer.summary().unwrap();
    assert_eq!(summary.total_typed, 2);
    assert_eq!(summary.total_errors, 0);
    assert_eq!(summary.completion_ratio, 1.0);
}

#[test]
fn headless_strict_mode_flow() {
    let mut trainer = Trainer::with_text(
        SessionConfig::default(),
        Text::single_line("prompt", "ab", 15),
    );

    assert_eq!(trainer.write('x').unwrap(), Keystroke::Rejected);
    assert_eq!(trainer.typed(), "");

    trainer.write('a').unwrap();
    assert_eq!(trainer.typed(), "a");
    trainer.write('b').unwrap();
    assert!(trainer.has_finished());
    assert_eq!(trainer.state().total_errors, 1);
}

#[test]
fn headless_timed_session_finishes_by_time() {
    let mut trainer = Trainer::with_text(
        SessionConfig::default(),
        Text::single_line("prompt", "hello", 1),
    );
    trainer.write('h').unwrap();

    let (_tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(50)),
    );

    // up to ~3s of wall time for a one second session
    for _ in 0..60u32 {
        if let TrainerEvent::Tick = runner.step() {
            trainer.on_tick();
        }
        if trainer.has_finished() {
            break;
        }
    }

    assert!(trainer.has_finished(), "timed session should finish by timeout");
    let state = trainer.state();
    assert_eq!(state.elapsed_seconds, 1);
    assert_eq!(state.samples.len(), 2);
    assert_eq!(state.samples.total_chars(), 1);
}

#[test]
fn headless_steady_typing_still_times_out() {
    let line = "a".repeat(500);
    let mut trainer = Trainer::with_text(
        SessionConfig::default(),
        Text::single_line("prompt", line, 1),
    );

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(100)),
    );

    // keys arrive faster than the tick interval, so the runner never times out
    let typist = thread::spawn(move || {
        for _ in 0..40 {
            if tx.send(key('a')).is_err() {
                break;
            }
            thread::sleep(Duration::from_millis(60));
        }
    });

    let started = Instant::now();
    while !trainer.has_finished() && started.elapsed() < Duration::from_secs(5) {
        match runner.step() {
            TrainerEvent::Tick => trainer.on_tick(),
            TrainerEvent::Key(KeyEvent {
                code: KeyCode::Char(c),
                ..
            }) => {
                trainer.write(c).unwrap();
            }
            _ => {}
        }
    }
    drop(runner);
    typist.join().unwrap();

    assert!(trainer.has_finished(), "a 1s session must end while keys keep coming");
    let snapshot = trainer.snapshot().unwrap();
    assert_eq!(snapshot.reason, FinishReason::Timeout);
    assert_eq!(snapshot.elapsed_seconds, 1);
    assert_eq!(snapshot.samples.len(), 2);
    assert!(snapshot.total_typed < 40);
    assert_eq!(snapshot.samples.total_chars(), snapshot.total_typed);
}
