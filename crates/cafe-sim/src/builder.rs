//! Fluent builder for constructing a [`Sim`].

use cafe_core::{SimConfig, SimRng};
use cafe_customer::{CustomerConfig, CustomerStore, Menu};
use cafe_grid::{GridWorld, PathFinder};

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<P>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — tick length, total ticks, seed, …
/// - [`GridWorld`] — the live grid built from a layout
/// - `P: PathFinder` — the search (e.g. [`cafe_grid::AStarPathFinder`])
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                     |
/// |------------------------|-----------------------------|
/// | `.customer_config(c)`  | `CustomerConfig::default()` |
/// | `.menu(m)`             | Empty menu                  |
///
/// # Example
///
/// ```rust,ignore
/// let grid = GridWorld::new(load_layout_csv(path, 1)?, GridTransform::default())?;
/// let mut sim = SimBuilder::new(config, grid, AStarPathFinder)
///     .menu(load_menu_csv(menu_path)?)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<P: PathFinder> {
    config:          SimConfig,
    customer_config: Option<CustomerConfig>,
    menu:            Option<Menu>,
    grid:            GridWorld,
    path_finder:     P,
}

impl<P: PathFinder> SimBuilder<P> {
    pub fn new(config: SimConfig, grid: GridWorld, path_finder: P) -> Self {
        Self {
            config,
            customer_config: None,
            menu:            None,
            grid,
            path_finder,
        }
    }

    pub fn customer_config(mut self, config: CustomerConfig) -> Self {
        self.customer_config = Some(config);
        self
    }

    /// Supply the menu customers order from.
    ///
    /// If not called, customers sit down without ordering and leave when
    /// their ordering patience runs out.
    pub fn menu(mut self, menu: Menu) -> Self {
        self.menu = Some(menu);
        self
    }

    /// Validate inputs and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<P>> {
        self.config
            .validate()
            .map_err(|e| SimError::Config(e.to_string()))?;
        let customer_config = self.customer_config.unwrap_or_default();
        customer_config.validate()?;

        #[cfg(feature = "parallel")]
        let pool = match self.config.num_threads {
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| SimError::Config(e.to_string()))?,
            ),
            None => None,
        };

        Ok(Sim {
            clock:         self.config.make_clock(),
            rng:           SimRng::new(self.config.seed),
            config:        self.config,
            customer_config,
            menu:          self.menu.unwrap_or_default(),
            grid:          self.grid,
            customers:     CustomerStore::new(),
            path_finder:   self.path_finder,
            score:         0,
            spawn_elapsed: 0.0,
            #[cfg(feature = "parallel")]
            pool,
        })
    }
}
