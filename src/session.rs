//! Single owner of the capture session: first-time setup or restore of the
//! settings, the displayed stream and the selected video mode.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use derive_more::{Display, From};
use futures::lock::Mutex;
use tracerr::Traced;

use crate::{
    conf::Conf,
    media::{
        select_devices, CapabilityProber, ConstraintCandidate, LocalStream,
        MediaStreamSettings, ProbeProgress, SelectDevicesError,
        SupportedConstraints,
    },
    platform::{self, KeyValueStorage, MediaDevices},
    settings::{SettingsBlob, SettingsError, SettingsStore},
    utils::JsCaused,
};

/// Errors that may occur in a [`Session`].
#[derive(Clone, Debug, Display, From, PartialEq)]
pub enum SessionError {
    /// Capture devices couldn't be selected. Fatal for the session.
    #[display(fmt = "{}", _0)]
    Select(SelectDevicesError),

    /// Settings couldn't be read or written.
    #[display(fmt = "{}", _0)]
    Settings(SettingsError),

    /// [`Session::init`] hasn't completed yet.
    #[display(fmt = "Session is not initialized")]
    #[from(ignore)]
    NotInitialized,

    /// Requested video mode is not one of the supported ones.
    #[display(fmt = "Video mode {} is out of range", _0)]
    #[from(ignore)]
    ModeOutOfRange(usize),

    /// Stream with the exact constraints of a supported mode couldn't be
    /// opened.
    #[display(fmt = "Failed to get local media: {}", _0)]
    #[from(ignore)]
    GetUserMediaFailed(platform::Error),
}

impl JsCaused for SessionError {
    type Error = platform::Error;

    fn name(&self) -> &'static str {
        match self {
            Self::Select(err) => err.name(),
            Self::Settings(err) => err.name(),
            Self::NotInitialized => "NotInitialized",
            Self::ModeOutOfRange(_) => "ModeOutOfRange",
            Self::GetUserMediaFailed(_) => "GetUserMediaFailed",
        }
    }

    fn js_cause(self) -> Option<Self::Error> {
        match self {
            Self::Select(err) => err.js_cause(),
            Self::Settings(err) => err.js_cause(),
            Self::GetUserMediaFailed(err) => Some(err),
            Self::NotInitialized | Self::ModeOutOfRange(_) => None,
        }
    }
}

type Result<T> = std::result::Result<T, Traced<SessionError>>;

/// Callback invoked after every probing trial.
type ProgressCallback = Rc<dyn Fn(ProbeProgress)>;

/// Capture session of a single page.
///
/// On [`Session::init`] either restores the devices and video modes stored by
/// a previous session, or selects the devices, probes every configured
/// candidate against them and stores the result. Afterwards a stream of any
/// supported mode can be started with [`Session::start_stream`].
///
/// At most one stream is held at a time, and it's stopped when the
/// [`Session`] is dropped.
///
/// [`Session::init`], [`Session::reset`] and [`Session::start_stream`] are
/// serialized: a call made while another one is still running waits for it
/// to complete, so capture requests are never issued concurrently.
pub struct Session<D: MediaDevices, S> {
    devices: D,

    /// Held for the whole duration of an operation requesting capture.
    capture: Mutex<()>,

    store: SettingsStore<S>,
    prober: CapabilityProber,
    settings: RefCell<Option<SettingsBlob>>,
    stream: RefCell<Option<LocalStream<D::Track>>>,
    selected_mode: Cell<Option<usize>>,
    on_progress: RefCell<Option<ProgressCallback>>,
}

impl<D: MediaDevices, S: KeyValueStorage> Session<D, S> {
    /// Creates a new uninitialized [`Session`].
    #[must_use]
    pub fn new(devices: D, storage: S, conf: &Conf) -> Self {
        Self {
            devices,
            capture: Mutex::new(()),
            store: SettingsStore::new(storage, conf.storage.key.clone()),
            prober: CapabilityProber::new(conf.probe.candidates()),
            settings: RefCell::new(None),
            stream: RefCell::new(None),
            selected_mode: Cell::new(None),
            on_progress: RefCell::new(None),
        }
    }

    /// Sets the callback invoked after every probing trial of a first-time
    /// setup.
    ///
    /// May be called from within the callback itself, in which case the new
    /// callback receives the following trials.
    pub fn on_probe_progress<F>(&self, f: F)
    where
        F: Fn(ProbeProgress) + 'static,
    {
        self.on_progress.replace(Some(Rc::new(f)));
    }

    /// Restores the stored settings, or runs the first-time setup if there
    /// are none.
    ///
    /// Stored settings which can't be parsed, or which mention candidates not
    /// configured for this [`Session`], are discarded and the first-time
    /// setup runs instead.
    ///
    /// # Errors
    ///
    /// With [`SessionError::Select`] if capture devices can't be selected.
    ///
    /// With [`SessionError::Settings`] if the settings storage is
    /// inaccessible.
    pub async fn init(&self) -> Result<()> {
        let _capture = self.capture.lock().await;
        self.stop_stream();
        self.settings.replace(None);

        if let Some(blob) = self.restore()? {
            log::info!(
                "Restored {} supported video modes",
                blob.supported().len(),
            );
            self.settings.replace(Some(blob));
            return Ok(());
        }
        self.setup().await
    }

    /// Stops the current stream, forgets the stored settings and runs the
    /// first-time setup again.
    ///
    /// # Errors
    ///
    /// Same as [`Session::init`].
    pub async fn reset(&self) -> Result<()> {
        let _capture = self.capture.lock().await;
        self.stop_stream();
        self.settings.replace(None);
        self.store.clear().map_err(tracerr::map_from_and_wrap!())?;
        self.setup().await
    }

    /// Returns the supported video modes, if initialized.
    #[must_use]
    pub fn supported_modes(&self) -> Option<SupportedConstraints> {
        self.settings
            .borrow()
            .as_ref()
            .map(|blob| blob.supported().clone())
    }

    /// Returns the current settings, if initialized.
    #[must_use]
    pub fn settings(&self) -> Option<SettingsBlob> {
        self.settings.borrow().clone()
    }

    /// Returns index of the video mode of the current stream.
    #[inline]
    #[must_use]
    pub fn selected_mode(&self) -> Option<usize> {
        self.selected_mode.get()
    }

    /// Opens a stream with the exact constraints of the supported video mode
    /// with the given index, replacing the current one.
    ///
    /// The current stream is stopped before the new one is requested.
    ///
    /// # Errors
    ///
    /// With [`SessionError::NotInitialized`] if [`Session::init`] hasn't
    /// completed.
    ///
    /// With [`SessionError::ModeOutOfRange`] if there is no such mode.
    ///
    /// With [`SessionError::GetUserMediaFailed`] if the stream can't be
    /// opened.
    pub async fn start_stream(&self, mode: usize) -> Result<()> {
        let _capture = self.capture.lock().await;
        let (caps, candidate) = self.mode_settings(mode)?;
        self.stop_stream();

        let tracks = self
            .devices
            .get_user_media(caps)
            .await
            .map_err(|e| {
                let (err, trace) = e.into_parts();
                Traced::from_parts(SessionError::GetUserMediaFailed(err), trace)
            })
            .map_err(tracerr::wrap!())?;

        log::debug!("Streaming in {}", candidate);
        self.stream.replace(Some(LocalStream::new(tracks)));
        self.selected_mode.set(Some(mode));
        Ok(())
    }

    /// Stops the current stream, if any.
    pub fn stop_stream(&self) {
        if let Some(stream) = self.stream.take() {
            stream.release();
        }
        self.selected_mode.set(None);
    }

    /// Calls the given function with the current stream, if any.
    pub fn with_stream<F, R>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&LocalStream<D::Track>) -> R,
    {
        self.stream.borrow().as_ref().map(f)
    }

    /// Builds exact constraints of the supported mode with the given index.
    fn mode_settings(
        &self,
        mode: usize,
    ) -> Result<(MediaStreamSettings, ConstraintCandidate)> {
        let settings = self.settings.borrow();
        let blob = settings
            .as_ref()
            .ok_or_else(|| tracerr::new!(SessionError::NotInitialized))?;
        let candidate = blob
            .supported()
            .get(mode)
            .ok_or_else(|| tracerr::new!(SessionError::ModeOutOfRange(mode)))?;
        Ok((MediaStreamSettings::exact(blob.devices(), candidate), candidate))
    }

    /// Loads the stored settings, discarding them if they are unusable.
    fn restore(&self) -> Result<Option<SettingsBlob>> {
        let known = self.prober.candidates();
        match self.store.load() {
            Ok(Some(blob)) if blob.supported().is_subsequence_of(known) => {
                Ok(Some(blob))
            }
            Ok(Some(_)) => {
                log::warn!(
                    "Stored settings don't match the configured candidates, \
                     discarding them",
                );
                self.discard()
            }
            Ok(None) => Ok(None),
            Err(e) if matches!(e.as_ref(), SettingsError::Corrupt(_)) => {
                log::warn!("Discarding stored settings: {}", e.as_ref());
                self.discard()
            }
            Err(e) => Err(e).map_err(tracerr::map_from_and_wrap!()),
        }
    }

    fn discard(&self) -> Result<Option<SettingsBlob>> {
        self.store.clear().map_err(tracerr::map_from_and_wrap!())?;
        Ok(None)
    }

    /// Selects the devices, probes every candidate against them and stores
    /// the result.
    async fn setup(&self) -> Result<()> {
        let devices = select_devices(&self.devices)
            .await
            .map_err(tracerr::map_from_and_wrap!())?;

        let supported = self
            .prober
            .probe_with_progress(&self.devices, &devices, |progress| {
                let callback = self.on_progress.borrow().clone();
                if let Some(f) = callback {
                    f(progress);
                }
            })
            .await;

        let blob = SettingsBlob::new(devices, supported);
        if let Err(e) = self.store.save(&blob) {
            log::error!("Settings are not persisted: {}", e.as_ref());
        }
        self.settings.replace(Some(blob));
        Ok(())
    }
}
