use super::{core::Effect, main::ActivityMonitor};
use crate::activity_monitor::core::{init, transition, Model};
use crate::activity_monitor::render::Render;
use crate::activity_monitor::run_effect::RunEffect;
use crate::device_camera::guard::CameraGuard;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Raises the stop flag when dropped. Declared after the camera guard so the
/// tick thread is told to stop before the camera is released.
struct StopOnExit(Arc<AtomicBool>);

impl Drop for StopOnExit {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

impl ActivityMonitor {
    pub fn run(&self) -> Result<(), Arc<dyn std::error::Error + Send + Sync>> {
        // Dropped on every way out of this function, releasing the camera.
        let _camera_guard = CameraGuard::new(self.device_camera.clone(), self.logger.clone());

        self.stopped.store(false, Ordering::SeqCst);
        let _stop_on_exit = StopOnExit(self.stopped.clone());

        let render = Render::new(self.device_display.clone(), self.config.clone());
        let run_effect = RunEffect::new(self.clone());

        render.init().map_err(to_shared)?;

        let (mut current_model, effects) = init(&self.config);
        self.publish(&current_model);
        render.render(&current_model).map_err(to_shared)?;
        self.execute_effects(&run_effect, effects);

        loop {
            let event = {
                let receiver = self
                    .event_receiver
                    .lock()
                    .map_err(|e| to_shared(e.to_string().into()))?;
                receiver
                    .recv()
                    .map_err(|e| to_shared(Box::new(io::Error::new(io::ErrorKind::Other, e))))?
            };

            if !event.is_tick() {
                let _ = self.logger.info(&format!("event: {:?}", event));
            }

            let old_status = current_model.status();
            let (new_model, effects) = transition(&self.config, current_model, event);

            if new_model.status() != old_status {
                let _ = self.logger.info(&format!(
                    "status: {} -> {} (motion {})",
                    old_status.label(),
                    new_model.status().label(),
                    new_model.motion_score
                ));
            }
            if !effects.is_empty() {
                let _ = self.logger.info(&format!("effects: {:?}", effects));
            }

            current_model = new_model;
            self.publish(&current_model);
            render.render(&current_model).map_err(to_shared)?;

            if current_model.shutting_down {
                let _ = self.logger.info("Shutting down");
                return Ok(());
            }

            self.execute_effects(&run_effect, effects);
        }
    }

    fn publish(&self, model: &Model) {
        if let Ok(mut shared) = self.model.lock() {
            *shared = model.clone();
        }
    }

    fn execute_effects(&self, run_effect: &RunEffect, effects: Vec<Effect>) {
        for effect in effects {
            let run_effect = run_effect.clone();
            std::thread::spawn(move || run_effect.run_effect(effect));
        }
    }
}

fn to_shared(
    e: Box<dyn std::error::Error + Send + Sync>,
) -> Arc<dyn std::error::Error + Send + Sync> {
    Arc::from(e)
}
