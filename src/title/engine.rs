//! Process-wide title state
//!
//! One `Engine` per process lives behind a spin lock.  `setup` initializes it exactly once; every
//! later title operation goes through the strategy chosen then.  Hosts managing their own memory,
//! and tests, may drive a private `Engine` instead.

use crate::config::Config;
use crate::err::Error;
use crate::log;
use crate::os::{Argv, Envp, Hex, Mapping};
use crate::title::growable::{self, Grown};
use crate::title::{
    ArgBlock, ArgvSnapshot, EnvironSnapshot, TitleBuffer, relocate_args, relocate_environ,
    set_thread_title,
};
use crate::types::c_char;
use crate::util::mem::until_nul;
use spin::Mutex;

/// How titles reach the display, chosen once at setup
#[derive(Debug)]
pub enum Strategy {
    /// No usable block; titles are dropped
    Disabled,
    /// Fixed-capacity writes into the block
    InPlace(TitleBuffer),
    /// Fixed-capacity writes, moving the kernel's argument range whenever a title does not fit
    Growable {
        title: TitleBuffer,
        /// Buffer the kernel currently reports, once the range has been moved
        grown: Option<Mapping>,
    },
}

impl Strategy {
    pub fn buffer(&self) -> Option<&TitleBuffer> {
        match self {
            Strategy::Disabled => None,
            Strategy::InPlace(buf) | Strategy::Growable { title: buf, .. } => Some(buf),
        }
    }

    pub fn is_growable(&self) -> bool {
        matches!(self, Strategy::Growable { .. })
    }
}

/// Checks whether the kernel relocation path is usable
pub type ProbeFn = fn() -> Result<(), Error>;
/// Moves the kernel's argument range to a buffer holding the given title
pub type GrowFn = fn(&[u8]) -> Result<Grown, Error>;

pub struct Engine {
    config: Config,
    initialized: bool,
    strategy: Strategy,
    environ: Option<EnvironSnapshot>,
    args: Option<ArgvSnapshot>,
    probe: ProbeFn,
    grow: GrowFn,
}

impl Engine {
    pub const fn new() -> Self {
        Self::with_relocation(growable::probe, growable::try_grow)
    }

    /// Engine whose `Growable` strategy goes through `probe` and `grow` instead of
    /// `PR_SET_MM_MAP`
    pub const fn with_relocation(probe: ProbeFn, grow: GrowFn) -> Self {
        Self {
            config: Config::new(),
            initialized: false,
            strategy: Strategy::Disabled,
            environ: None,
            args: None,
            probe,
            grow,
        }
    }

    /// Discover the argument block, reclaim environment space, and choose a strategy.
    ///
    /// Only the first call does anything.  On error the engine stays `Disabled` and no memory the
    /// host can observe has been changed.
    pub fn setup(&mut self, argv: &mut Argv, envp: &mut Envp, config: Config) -> Result<(), Error> {
        if self.initialized {
            return Ok(());
        }
        self.initialized = true;
        self.config = config;
        if config.debug {
            log::enable();
        }

        let args = match ArgBlock::locate(argv, envp) {
            Ok(block) => block,
            Err(e) => {
                log::debug_value("falling back to adjacent arguments: ", e);
                ArgBlock::from_adjacent_args(argv)?
            }
        };

        let block = if config.relocate_environ {
            args.extend_over_environ(envp)
        } else {
            args
        };

        log::debug_value("argument block at ", Hex(block.start() as usize));
        log::debug_value("argument block capacity ", block.capacity());

        if block.capacity() > args.capacity() {
            self.environ = Some(relocate_environ(envp).inspect_err(|e| {
                log::debug_value("unable to relocate environment: ", e);
            })?);
        }
        self.args = Some(relocate_args(argv, &block).inspect_err(|e| {
            log::debug_value("unable to relocate arguments: ", e);
        })?);

        let title = TitleBuffer::from_arguments(block, args.capacity());

        self.strategy = if config.growable {
            match (self.probe)() {
                Ok(()) => Strategy::Growable { title, grown: None },
                Err(e) => {
                    log::debug_value("titles limited to the argument block: ", e);
                    Strategy::InPlace(title)
                }
            }
        } else {
            Strategy::InPlace(title)
        };

        Ok(())
    }

    /// Display `title`.  Never fails; a title that does not fit is truncated.
    ///
    /// Returns the number of bytes now displayed.
    pub fn set_title(&mut self, title: &[u8]) -> usize {
        let title = until_nul(title);
        let update_comm = self.config.update_comm;
        let grow = self.grow;
        let mut downgrade = false;

        let written = match &mut self.strategy {
            Strategy::Disabled => 0,
            Strategy::InPlace(buf) => buf.set(title),
            Strategy::Growable { title: buf, grown } => {
                if title.len() > buf.max_len() {
                    match grow(title) {
                        Ok(g) => {
                            *buf = TitleBuffer::new(g.block, title.len());
                            // The kernel no longer refers to the previous buffer.
                            if let Some(old) = grown.replace(g.mapping) {
                                let _ = old.unmap();
                            }
                        }
                        Err(e) => {
                            log::debug_value("unable to grow title: ", e);
                            downgrade = e.is_permanent();
                        }
                    }
                }

                let written = buf.set(title);
                if update_comm {
                    set_thread_title(title);
                }
                written
            }
        };

        if downgrade {
            self.downgrade();
        }

        written
    }

    /// Copy the displayed title into `out`, returning its length.
    pub fn get_title(&self, out: &mut [u8]) -> usize {
        self.strategy.buffer().map_or(0, |buf| buf.get(out))
    }

    /// Longest title that currently displays without truncation
    pub fn capacity(&self) -> usize {
        self.strategy.buffer().map_or(0, TitleBuffer::max_len)
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn environ(&self) -> Option<&EnvironSnapshot> {
        self.environ.as_ref()
    }

    pub fn args(&self) -> Option<&ArgvSnapshot> {
        self.args.as_ref()
    }

    /// Stop using the kernel relocation path for the rest of the process.
    fn downgrade(&mut self) {
        self.strategy = match core::mem::replace(&mut self.strategy, Strategy::Disabled) {
            // A grown mapping may still be the buffer the kernel reports; dropping the handle
            // leaves it mapped.
            Strategy::Growable { title, .. } => {
                log::debug("kernel relocation disabled");
                Strategy::InPlace(title)
            }
            other => other,
        };
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

static ENGINE: Mutex<Engine> = Mutex::new(Engine::new());

/// Prepare the process title, configured from `PROCTITLE_*` environment variables.
///
/// Safe to call more than once; only the first call has an effect.  Call it before the first
/// `set_title` to get the full capacity.
///
/// # Safety
/// - `argv` must point at `argc` argument pointers and `envp` at a null-terminated table of
///   environment pointers, ideally the ones the kernel passed to the process.
/// - Both tables and the strings they reference must stay valid, and the tables writable, for the
///   rest of the process.
/// - No other thread may read either table while this runs.
pub unsafe fn setup(
    argc: isize,
    argv: *mut *const c_char,
    envp: *mut *const c_char,
) -> Result<(), Error> {
    let config = Config::from_envp(&unsafe { Envp::from_raw(envp) });
    unsafe { setup_with_config(argc, argv, envp, config) }
}

/// `setup` with an explicit configuration; environment variables are not consulted.
///
/// # Safety
/// Same as `setup`.
pub unsafe fn setup_with_config(
    argc: isize,
    argv: *mut *const c_char,
    envp: *mut *const c_char,
    config: Config,
) -> Result<(), Error> {
    let mut argv = unsafe { Argv::from_raw(argc, argv) };
    let mut envp = unsafe { Envp::from_raw(envp) };
    ENGINE.lock().setup(&mut argv, &mut envp, config)
}

/// Change the process title.  Truncates silently if it does not fit.
pub fn set_title(title: &[u8]) {
    ENGINE.lock().set_title(title);
}

/// Current process title, copied into `out`.  Empty before setup.
pub fn get_title(out: &mut [u8]) -> &[u8] {
    let len = ENGINE.lock().get_title(out);
    let out: &[u8] = out;
    out.get(..len).unwrap_or(&[])
}

/// Longest title that currently displays without truncation
pub fn title_capacity() -> usize {
    ENGINE.lock().capacity()
}

/// Null-terminated table of the relocated environment, for hosts that keep their own `environ`
/// pointer and want to install it.  `None` if the environment was not relocated.
pub fn environ_table() -> Option<*const *const c_char> {
    ENGINE.lock().environ().map(EnvironSnapshot::table)
}
