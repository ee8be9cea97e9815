// CalibrationApp: application controller
//
// Owns every piece of mutable UI state as plain data (current screen,
// logged-in user, sequencer, electrode panel) and is the only place where
// sequencer effects meet the display surface and dialog host. Failures at
// that boundary (missing assets, render errors, export errors) become
// dialogs; none of them stop a calibration run.

use std::path::Path;
use std::time::Duration;

use log::{info, warn};
use rand::Rng;

use crate::assets::AssetCatalog;
use crate::auth::{Credential, CredentialStore};
use crate::calibration::{
    CalibrationSequencer, PromptImage, SequencerEffect, SequencerState, StartOutcome,
};
use crate::config::AppConfig;
use crate::display::{DialogHost, DisplayUpdate, DisplaySurface, ImageUpdate, Notification};
use crate::electrode::ElectrodePanel;
use crate::error::{log_auth_error, log_calibration_error, AuthError, CalibrationError, ErrorCode};
use crate::export::export_session;
use crate::signal::{SyntheticEegSource, WaveformSource};

/// Screen currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    Calibration,
    ElectrodeStatus,
}

/// Result of a save request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// File written, user chose to keep working
    Saved,
    /// File written, user chose to exit
    ExitRequested,
    /// Export failed; the session is kept for another attempt
    Failed,
    /// No session exists; nothing written
    NothingToSave,
}

/// Application controller
pub struct CalibrationApp<S, D, H> {
    store: S,
    display: D,
    dialogs: H,
    sequencer: CalibrationSequencer,
    assets: AssetCatalog,
    electrodes: ElectrodePanel,
    screen: Screen,
    user: Option<Credential>,
}

impl<S, D, H> CalibrationApp<S, D, H>
where
    S: CredentialStore,
    D: DisplaySurface,
    H: DialogHost,
{
    /// Create the controller on the login screen with the synthetic EEG source
    pub fn new(config: &AppConfig, store: S, display: D, dialogs: H) -> Self {
        let source = SyntheticEegSource::new();
        Self::with_source(config, store, display, dialogs, Box::new(source))
    }

    /// Create the controller with a specific waveform source
    pub fn with_source(
        config: &AppConfig,
        store: S,
        display: D,
        dialogs: H,
        source: Box<dyn WaveformSource>,
    ) -> Self {
        Self {
            store,
            display,
            dialogs,
            sequencer: CalibrationSequencer::new(&config.calibration, source),
            assets: AssetCatalog::from_config(&config.assets),
            electrodes: ElectrodePanel::new(),
            screen: Screen::Login,
            user: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn user(&self) -> Option<&Credential> {
        self.user.as_ref()
    }

    pub fn sequencer(&self) -> &CalibrationSequencer {
        &self.sequencer
    }

    pub fn electrodes(&self) -> &ElectrodePanel {
        &self.electrodes
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn dialogs(&self) -> &H {
        &self.dialogs
    }

    // ========================================================================
    // LOGIN / REGISTER
    // ========================================================================

    pub fn show_register(&mut self) {
        if self.screen == Screen::Login {
            self.screen = Screen::Register;
        }
    }

    pub fn show_login(&mut self) {
        if self.screen == Screen::Register {
            self.screen = Screen::Login;
        }
    }

    /// Authenticate and move to the calibration screen
    ///
    /// # Returns
    /// `true` on success; on failure an error dialog has been shown
    pub fn login(&mut self, username: &str, password: &str) -> bool {
        match self.store.authenticate(username, password) {
            Ok(credential) => {
                self.user = Some(credential);
                self.screen = Screen::Calibration;
                true
            }
            Err(err) => {
                log_auth_error(&err, "login");
                self.dialogs
                    .notify(&Notification::error("Error", err.message()));
                false
            }
        }
    }

    /// Register a new user and return to the login screen
    ///
    /// # Returns
    /// `true` on success; on failure an error dialog has been shown
    pub fn register(&mut self, username: &str, password: &str) -> bool {
        match self.store.register(username, password) {
            Ok(_) => {
                self.dialogs.notify(&Notification::info(
                    "Success",
                    "User registered successfully!",
                ));
                self.screen = Screen::Login;
                true
            }
            Err(AuthError::DuplicateUsername { .. }) => {
                self.dialogs
                    .notify(&Notification::error("Error", "Username already exists!"));
                false
            }
            Err(err) => {
                log_auth_error(&err, "register");
                self.dialogs
                    .notify(&Notification::error("Error", err.message()));
                false
            }
        }
    }

    // ========================================================================
    // CALIBRATION
    // ========================================================================

    /// Start calibration from the calibration screen
    ///
    /// # Returns
    /// `None` when not on the calibration screen, otherwise the sequencer's
    /// outcome (a start while running is ignored)
    pub fn start_calibration(&mut self) -> Option<StartOutcome> {
        if self.screen != Screen::Calibration {
            warn!("[App] start_calibration ignored on {:?} screen", self.screen);
            return None;
        }
        let outcome = self.sequencer.start();
        self.dispatch_effects();
        Some(outcome)
    }

    /// Move calibration time forward by `elapsed`
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let fired = self.sequencer.advance(elapsed);
        self.dispatch_effects();
        fired
    }

    /// Fire the next pending transition immediately
    pub fn advance_to_next(&mut self) -> bool {
        let fired = self.sequencer.advance_to_next();
        self.dispatch_effects();
        fired
    }

    pub fn time_until_next_transition(&mut self) -> Option<Duration> {
        self.sequencer.time_until_next()
    }

    pub fn calibration_state(&self) -> SequencerState {
        self.sequencer.state()
    }

    /// Export the current session to `path`
    ///
    /// On success the user is asked whether to exit.
    pub fn save_data<P: AsRef<Path>>(&mut self, path: P) -> SaveOutcome {
        let Some(session) = self.sequencer.session() else {
            let err = CalibrationError::NoSession;
            log_calibration_error(&err, "save_data");
            self.dialogs
                .notify(&Notification::warning("Save Data", err.message()));
            return SaveOutcome::NothingToSave;
        };

        match export_session(session, path) {
            Ok(_) => {
                self.dialogs
                    .notify(&Notification::info("Success", "Data saved successfully!"));
                if self
                    .dialogs
                    .confirm("Exit Application", "Do you want to exit the application?")
                {
                    SaveOutcome::ExitRequested
                } else {
                    SaveOutcome::Saved
                }
            }
            Err(err) => {
                self.dialogs
                    .notify(&Notification::error("Error", err.message()));
                SaveOutcome::Failed
            }
        }
    }

    // ========================================================================
    // ELECTRODE STATUS
    // ========================================================================

    /// Reroll electrode statuses and switch to the electrode screen
    ///
    /// Unavailable while a calibration is running.
    pub fn show_electrode_status<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.screen != Screen::Calibration {
            return false;
        }
        if self.sequencer.is_running() {
            self.dialogs.notify(&Notification::warning(
                "Electrode Status",
                "Electrode status is unavailable while calibrating",
            ));
            return false;
        }
        self.electrodes.randomize(rng);
        info!(
            "[App] Electrode status: {}/{} active",
            self.electrodes.active_count(),
            self.electrodes.statuses().len()
        );
        self.screen = Screen::ElectrodeStatus;
        true
    }

    /// Return to the calibration screen; calibration state is untouched
    pub fn back_to_calibration(&mut self) {
        if self.screen == Screen::ElectrodeStatus {
            self.screen = Screen::Calibration;
        }
    }

    // ========================================================================
    // EFFECT DISPATCH
    // ========================================================================

    fn dispatch_effects(&mut self) {
        for effect in self.sequencer.drain_effects() {
            match effect {
                SequencerEffect::Render {
                    instruction,
                    prompt,
                    progress,
                } => {
                    let image = self.resolve_prompt(prompt);
                    let update = DisplayUpdate {
                        instruction,
                        image,
                        progress,
                    };
                    if let Err(err) = self.display.render(&update) {
                        self.report(CalibrationError::RenderFailed { reason: err.reason });
                    }
                }
                SequencerEffect::Plot { action, waveform } => {
                    let title = format!("EEG Data - {}", action);
                    if let Err(err) = self.display.plot(&title, &waveform) {
                        self.report(CalibrationError::RenderFailed { reason: err.reason });
                    }
                }
                SequencerEffect::Notify(notification) => self.dialogs.notify(&notification),
            }
        }
    }

    fn resolve_prompt(&mut self, prompt: PromptImage) -> ImageUpdate {
        match prompt {
            PromptImage::Show(action) => {
                let image = match self.assets.load(&self.assets.image_for(action)) {
                    Ok(path) => ImageUpdate::Show(path),
                    Err(err) => {
                        self.report(err);
                        ImageUpdate::Unchanged
                    }
                };
                if let Err(err) = self.assets.load(&self.assets.small_icon()) {
                    self.report(err);
                }
                image
            }
            PromptImage::Clear => ImageUpdate::Clear,
            PromptImage::Unchanged => ImageUpdate::Unchanged,
        }
    }

    fn report(&mut self, err: CalibrationError) {
        log_calibration_error(&err, "display");
        self.dialogs
            .notify(&Notification::error("Error", err.message()));
    }
}
