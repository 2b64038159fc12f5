impl SyncSession {
    fn on_link_edge(&mut self, edge: Option<LinkEdge>, intents: &mut Intents) {
        let Some(edge) = edge else {
            return;
        };

        match edge {
            LinkEdge::TransportLost => self.raise_alert(Alert::TransportDisconnected, intents),
            LinkEdge::AppLost => self.raise_alert(Alert::AppDisconnected, intents),
            LinkEdge::TransportRestored | LinkEdge::AppRestored => {
                emit(intents, Intent::ShowEvent(self.card_for(0)));

                self.store.begin_pass();
                info!("link restored ({:?}), starting sync pass", edge);
                emit(intents, Intent::Send(self.driver.calendar_request(0)));
                emit(intents, Intent::Vibrate(HapticCue::Confirmation));
            }
        }
    }

    fn raise_alert(&self, alert: Alert, intents: &mut Intents) {
        emit(intents, Intent::ShowAlert(alert));
        emit(intents, Intent::Vibrate(HapticCue::StrongAlert));
    }

    /// Card text for an event slot, labelled relative to the last clock tick.
    fn card_for(&mut self, slot: usize) -> EventCard {
        let Some(event) = self.store.slot(slot) else {
            return EventCard::default();
        };

        let when = if event.start_date.is_empty() {
            String::new()
        } else {
            self.formatter
                .label(self.now.date, &event.start_date, event.all_day)
        };

        EventCard {
            title: clipped(&event.title),
            when,
            location: clipped(event.location_text()),
        }
    }
}
