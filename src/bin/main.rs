use std::path::PathBuf;

use chrono::{Datelike, Local, NaiveDateTime, TimeDelta, Timelike};
use clap::Parser;
use diaryface_core::{
    CivilDate, ClockStyle, ClockTime, Intent, Request, SendFailure, SessionEvent, SyncConfig,
    SyncSession, Weekday,
    haptics::HapticCue,
    settings::{PreferenceStore, Preferences},
};
use diaryface_protocol::OutboundRequest;
use embassy_executor::Spawner;
use embassy_time::{Duration, Instant, Timer};
use log::{debug, info, warn};

use companion::ScriptedCompanion;
use prefs_file::FilePreferenceStore;
use settings_sync::SettingsSyncState;
use sim_queue::{SimEvent, SimQueue};

#[path = "main/companion.rs"]
mod companion;
#[path = "main/prefs_file.rs"]
mod prefs_file;
#[path = "main/settings_sync.rs"]
mod settings_sync;
#[path = "main/sim_queue.rs"]
mod sim_queue;

const PREFS_SAVE_DEBOUNCE_MS: u64 = 500;
/// Time the outbox stays busy after taking a message.
const OUTBOX_DRAIN_MS: u64 = 300;
/// Round trip before the companion's answer lands in the inbox.
const COMPANION_REPLY_MS: u64 = 80;
/// Delay before the platform reports a failed send.
const SEND_FAILURE_MS: u64 = 50;
const COMPANION_GREETING_MS: u64 = 1_000;
const COMPANION_RECONNECT_MS: u64 = 400;

/// Runs the watchface sync core against a scripted companion app.
#[derive(Parser, Debug)]
#[command(name = "diaryface", version, about)]
struct Args {
    /// Real milliseconds per simulated minute.
    #[arg(long, default_value_t = 2_000)]
    minute_ms: u64,

    /// Simulated minutes to run before exiting.
    #[arg(long, default_value_t = 12)]
    minutes: u32,

    /// Use the 12-hour clock style.
    #[arg(long)]
    twelve_hour: bool,

    /// File to persist preferences in. Without it preferences are volatile.
    #[arg(long)]
    prefs: Option<PathBuf>,

    /// Minute at which the link to the phone drops.
    #[arg(long)]
    drop_link_at: Option<u32>,

    /// Minute at which the link to the phone comes back.
    #[arg(long)]
    restore_link_at: Option<u32>,

    /// Keep the link up but never let the companion app answer.
    #[arg(long)]
    companion_offline: bool,
}

/// Simulated platform around a [`SyncSession`]: link, outbox, clock and
/// persistent storage.
struct Simulator {
    session: SyncSession,
    companion: ScriptedCompanion,
    queue: SimQueue,
    store: Option<FilePreferenceStore>,
    settings_sync: SettingsSyncState,
    link_up: bool,
    outbox_busy_until: Instant,
    started: Instant,
    wall_clock: NaiveDateTime,
}

impl Simulator {
    fn now_ms(&self) -> u64 {
        Instant::now().duration_since(self.started).as_millis()
    }

    fn feed(&mut self, event: SessionEvent<'_>) {
        let intents = self.session.handle(event);
        for intent in intents {
            self.carry_out(intent);
        }
    }

    fn carry_out(&mut self, intent: Intent) {
        let now = Instant::now();
        match intent {
            Intent::Send(request) => self.send(request),
            Intent::Schedule { after_ms, task } => {
                self.queue.push_after(
                    now,
                    Duration::from_millis(after_ms as u64),
                    SimEvent::Timer(task),
                );
            }
            Intent::ShowEvent(card) => {
                info!("[event] {} | {} | {}", card.title, card.when, card.location);
            }
            Intent::ShowAlert(alert) => {
                warn!("[event] {} | {}", alert.title(), alert.detail());
            }
            Intent::ShowClock(face) => {
                match (face.date, face.week) {
                    (Some(date), Some(week)) => info!("[clock] {} {} {}", face.time, date, week),
                    _ => info!("[clock] {}", face.time),
                }
            }
            Intent::ShowBattery(status) => match status.known_level() {
                Some(level) => info!("[battery] {}%", level),
                None => info!("[battery] unknown"),
            },
            Intent::Vibrate(cue) => vibrate(cue),
            Intent::ApplyPartialInverse(enabled) => {
                info!("[style] partial inverse {}", if enabled { "on" } else { "off" });
            }
            Intent::PersistPartialInverse(enabled) => {
                let now_ms = self.now_ms();
                if let Some(wait_ms) = self
                    .settings_sync
                    .track_current(Preferences::new(enabled), now_ms)
                {
                    self.queue.push_after(
                        now,
                        Duration::from_millis(wait_ms),
                        SimEvent::FlushPreferences,
                    );
                }
            }
        }
    }

    /// Platform outbox: refuses while draining, fails when nobody can answer.
    fn send(&mut self, request: OutboundRequest) {
        let now = Instant::now();
        let task = Request::from(request);

        if now < self.outbox_busy_until {
            self.feed(SessionEvent::OutboxBusy(task));
            return;
        }

        self.outbox_busy_until = now + Duration::from_millis(OUTBOX_DRAIN_MS);
        debug!("outbox took {:?}", request);
        self.feed(SessionEvent::OutboxAccepted(task));

        if !self.link_up || !self.companion.is_online() {
            self.queue.push_after(
                now,
                Duration::from_millis(SEND_FAILURE_MS),
                SimEvent::SendFailed(SendFailure::NotConnected),
            );
            return;
        }

        match self.companion.answer(request) {
            Ok(Some(reply)) => self.queue.push_after(
                now,
                Duration::from_millis(COMPANION_REPLY_MS),
                SimEvent::Deliver(reply),
            ),
            Ok(None) => {}
            Err(err) => warn!("companion could not build reply: {:?}", err),
        }
    }

    fn greet(&mut self, after_ms: u64) {
        if !self.companion.is_online() {
            return;
        }

        match self.companion.greeting() {
            Ok(messages) => {
                for message in messages {
                    self.queue.push_after(
                        Instant::now(),
                        Duration::from_millis(after_ms),
                        SimEvent::Deliver(message),
                    );
                }
            }
            Err(err) => warn!("companion greeting failed: {:?}", err),
        }
    }

    fn set_link(&mut self, up: bool) {
        self.link_up = up;
        info!("[link] {}", if up { "connected" } else { "disconnected" });
        self.feed(SessionEvent::TransportChanged(up));

        if up && self.companion.is_online() {
            match self.companion.reconnect_notice() {
                Ok(message) => self.queue.push_after(
                    Instant::now(),
                    Duration::from_millis(COMPANION_RECONNECT_MS),
                    SimEvent::Deliver(message),
                ),
                Err(err) => warn!("companion reconnect notice failed: {:?}", err),
            }
        }
    }

    /// Attempts the debounced write; re-queues itself while one is outstanding.
    fn flush_preferences(&mut self) -> Option<u64> {
        let now_ms = self.now_ms();
        let wait_ms = self.settings_sync.flush_if_due(self.store.as_mut(), now_ms)?;
        self.queue.push_after(
            Instant::now(),
            Duration::from_millis(wait_ms),
            SimEvent::FlushPreferences,
        );
        Some(wait_ms)
    }
}

fn vibrate(cue: HapticCue) {
    let pattern = cue.pattern();
    info!(
        "[vibe] {:?} pattern {} ({} pulses, {} ms)",
        cue,
        pattern.0,
        pattern.pulses(),
        pattern.duration_ms()
    );
}

fn clock_time(at: &NaiveDateTime) -> ClockTime {
    let weekday = Weekday::from_index(at.weekday().num_days_from_sunday() as u8);
    let date = CivilDate::new(at.year() as u16, at.month() as u8, at.day() as u8, weekday);
    ClockTime::new(date, at.hour() as u8, at.minute() as u8)
}

fn load_preferences(store: Option<&mut FilePreferenceStore>) -> Preferences {
    let Some(store) = store else {
        info!("no preference file; preferences will be volatile");
        return Preferences::default();
    };

    match store.load() {
        Ok(Some(preferences)) => {
            info!("preferences restored from {}", store.path().display());
            preferences
        }
        Ok(None) => {
            info!("no saved preferences");
            Preferences::default()
        }
        Err(err) => {
            warn!("failed to read saved preferences ({:?}); using defaults", err);
            Preferences::default()
        }
    }
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let local = Local::now().naive_local();
    let wall_clock = local.with_second(0).unwrap_or(local);
    let clock_style = if args.twelve_hour {
        ClockStyle::TwelveHour
    } else {
        ClockStyle::TwentyFourHour
    };

    let mut store = args.prefs.clone().map(FilePreferenceStore::new);
    let preferences = load_preferences(store.as_mut());

    let started = Instant::now();
    let mut sim = Simulator {
        session: SyncSession::new(
            SyncConfig::default(),
            clock_style,
            clock_time(&wall_clock),
            true,
        ),
        companion: ScriptedCompanion::new(!args.companion_offline, wall_clock),
        queue: SimQueue::default(),
        store,
        settings_sync: SettingsSyncState::new(preferences),
        link_up: true,
        outbox_busy_until: started,
        started,
        wall_clock,
    };

    info!(
        "diaryface simulator: {} minutes at {} ms/minute, {:?}",
        args.minutes, args.minute_ms, clock_style
    );

    for intent in sim.session.start(preferences) {
        sim.carry_out(intent);
    }
    sim.greet(COMPANION_GREETING_MS);
    sim.queue
        .push_after(started, Duration::from_millis(args.minute_ms), SimEvent::Tick);

    let mut minutes_elapsed = 0u32;
    while let Some(deadline) = sim.queue.next_deadline() {
        Timer::at(deadline).await;
        let Some(event) = sim.queue.pop() else {
            break;
        };

        match event {
            SimEvent::Timer(task) => sim.feed(SessionEvent::TimerFired(task)),
            SimEvent::Deliver(message) => {
                if sim.link_up {
                    sim.feed(SessionEvent::Inbound(&message));
                } else {
                    debug!("link down, dropping inbound message");
                }
            }
            SimEvent::SendFailed(failure) => sim.feed(SessionEvent::SendFailed(failure)),
            SimEvent::Transport(up) => sim.set_link(up),
            SimEvent::FlushPreferences => {
                sim.flush_preferences();
            }
            SimEvent::Tick => {
                minutes_elapsed += 1;
                sim.wall_clock += TimeDelta::minutes(1);
                let now = clock_time(&sim.wall_clock);
                sim.feed(SessionEvent::MinuteTick(now));

                let at = Instant::now();
                if args.drop_link_at == Some(minutes_elapsed) {
                    sim.queue.push_at(at, SimEvent::Transport(false));
                }
                if args.restore_link_at == Some(minutes_elapsed) {
                    sim.queue.push_at(at, SimEvent::Transport(true));
                }

                if minutes_elapsed >= args.minutes {
                    break;
                }
                sim.queue.push_after(
                    at,
                    Duration::from_millis(args.minute_ms),
                    SimEvent::Tick,
                );
            }
        }
    }

    if let Some(wait_ms) = sim.settings_sync.due_in(sim.now_ms()) {
        Timer::after_millis(wait_ms).await;
        if sim.flush_preferences().is_some() {
            warn!("exiting with unsaved preferences");
        }
    }

    info!(
        "simulation finished: transport={} app={} fetch_index={} battery={:?} ({} events left)",
        sim.session.transport_connected(),
        sim.session.app_connected(),
        sim.session.store().fetch_index(),
        sim.session.battery().known_level(),
        sim.queue.len()
    );
    std::process::exit(0);
}
