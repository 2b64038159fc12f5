impl SyncSession {
    fn on_inbound(&mut self, message: &Message, intents: &mut Intents) {
        let Some(response) = classify(message) else {
            debug!("ignoring message without a response key");
            return;
        };

        // A reply answers the request sent before any restore below resets
        // the cursor.
        let reply_slot = self.store.fetch_index() as usize;

        // Any recognized message proves the app is alive.
        let edge = self.links.app_heard();
        let restored = edge.is_some_and(|edge| !edge.is_loss());
        self.on_link_edge(edge, intents);

        match response {
            Response::Settings { partial_inverse } => {
                let Some(partial_inverse) = partial_inverse else {
                    debug!("settings response without partial-inverse value");
                    return;
                };
                self.preferences.partial_inverse = partial_inverse;
                emit(intents, Intent::ApplyPartialInverse(partial_inverse));
                emit(intents, Intent::PersistPartialInverse(partial_inverse));
            }
            Response::Reconnect => {
                info!(
                    "companion reconnected, re-requesting slot {}",
                    self.store.fetch_index()
                );
                emit(
                    intents,
                    self.driver
                        .schedule(self.driver.config().reconnect_ms, Request::Calendar),
                );
            }
            Response::Calendar(value) => {
                let event = match decode_calendar(value) {
                    Ok(event) => event,
                    Err(err) => {
                        debug!("dropping calendar payload: {:?}", err);
                        return;
                    }
                };

                // After a restore the fresh pass owns the cursor.
                let step = if restored {
                    self.store.accept_at(reply_slot, event)
                } else {
                    self.store.accept(event)
                };
                let Some(step) = step else {
                    debug!("calendar payload past the last slot");
                    return;
                };

                if let Some(slot) = step.display_slot {
                    emit(intents, Intent::ShowEvent(self.card_for(slot)));
                }
                if step.request_next {
                    emit(
                        intents,
                        self.driver
                            .schedule(self.driver.config().next_slot_ms, Request::Calendar),
                    );
                }
            }
            Response::Battery(value) => match decode_battery(value) {
                Ok(battery) => {
                    self.battery = battery;
                    emit(intents, Intent::ShowBattery(battery));
                }
                Err(err) => debug!("dropping battery payload: {:?}", err),
            },
        }
    }
}
