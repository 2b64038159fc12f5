impl SyncSession {
    fn on_minute_tick(&mut self, now: ClockTime, intents: &mut Intents) {
        self.now = now;
        let style = self.driver.clock_style();

        emit(intents, Intent::ShowClock(self.face.render(&now, style)));

        if starts_at(self.store.alarm_event(), &now, style) {
            info!("event alarm for slot {}", self.store.alarm_slot());
            emit(intents, Intent::Vibrate(HapticCue::EventAlarm));
        }

        if self.driver.is_resync_minute(now.minute) {
            self.store.begin_pass();
            debug!("periodic resync at {:02}:{:02}", now.hour, now.minute);
            emit(
                intents,
                self.driver
                    .schedule(self.driver.config().periodic_ms, Request::Calendar),
            );
        }
    }
}
