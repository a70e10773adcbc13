//! Parameter store and change notification
//!
//! Owns the live parameter record and the callback channel toward external
//! collaborators. Updates go through an explicit setter that validates first;
//! listeners only ever observe records that passed validation.

use rand::Rng;

use crate::params::{CityParams, ParamError};

type ChangeListener = Box<dyn FnMut(&CityParams)>;
type ResetListener = Box<dyn FnMut()>;

/// Holds the current parameters and notifies listeners on change.
pub struct ParameterStore {
    params: CityParams,
    on_change: Vec<ChangeListener>,
    on_reset_camera: Vec<ResetListener>,
}

impl ParameterStore {
    /// Create a store around an already-validated record.
    pub fn new(params: CityParams) -> Result<Self, ParamError> {
        params.validate()?;
        Ok(Self {
            params,
            on_change: Vec::new(),
            on_reset_camera: Vec::new(),
        })
    }

    pub fn params(&self) -> &CityParams {
        &self.params
    }

    /// Replace the parameters. A record that fails validation is rejected
    /// whole; the stored record stays untouched and no listener fires.
    pub fn set(&mut self, params: CityParams) -> Result<(), ParamError> {
        params.validate()?;
        self.params = params;
        for listener in &mut self.on_change {
            listener(&self.params);
        }
        Ok(())
    }

    /// Register a listener fired after every accepted parameter change.
    pub fn on_change(&mut self, listener: impl FnMut(&CityParams) + 'static) {
        self.on_change.push(Box::new(listener));
    }

    /// Register a listener for camera-reset requests. The store never resets
    /// anything itself; the camera collaborator owns that behavior.
    pub fn on_reset_camera(&mut self, listener: impl FnMut() + 'static) {
        self.on_reset_camera.push(Box::new(listener));
    }

    /// Ask the camera collaborator to return to its home position.
    pub fn request_camera_reset(&mut self) {
        for listener in &mut self.on_reset_camera {
            listener();
        }
    }

    /// Draw a fresh random seed, keep it, and notify listeners.
    pub fn randomize_seed<R: Rng>(&mut self, rng: &mut R) -> i64 {
        let seed = self.params.randomize_seed(rng);
        for listener in &mut self.on_change {
            listener(&self.params);
        }
        seed
    }
}

impl std::fmt::Debug for ParameterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterStore")
            .field("params", &self.params)
            .field("on_change", &self.on_change.len())
            .field("on_reset_camera", &self.on_reset_camera.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_set_fires_change_listeners() {
        let mut store = ParameterStore::new(CityParams::default()).unwrap();
        let seen = Rc::new(Cell::new(0.0));
        let seen_in = Rc::clone(&seen);
        store.on_change(move |p| seen_in.set(p.building_density));

        let mut next = CityParams::default();
        next.building_density = 0.7;
        store.set(next).unwrap();
        assert_eq!(seen.get(), 0.7);
        assert_eq!(store.params().building_density, 0.7);
    }

    #[test]
    fn test_rejected_update_leaves_store_and_listeners_untouched() {
        let mut store = ParameterStore::new(CityParams::default()).unwrap();
        let fired = Rc::new(Cell::new(false));
        let fired_in = Rc::clone(&fired);
        store.on_change(move |_| fired_in.set(true));

        let mut bad = CityParams::default();
        bad.main_road_interval = 0;
        assert!(store.set(bad).is_err());
        assert!(!fired.get());
        assert_eq!(*store.params(), CityParams::default());
    }

    #[test]
    fn test_camera_reset_reaches_listeners() {
        let mut store = ParameterStore::new(CityParams::default()).unwrap();
        let resets = Rc::new(Cell::new(0));
        let resets_in = Rc::clone(&resets);
        store.on_reset_camera(move || resets_in.set(resets_in.get() + 1));

        store.request_camera_reset();
        store.request_camera_reset();
        assert_eq!(resets.get(), 2);
    }

    #[test]
    fn test_randomize_seed_notifies_with_new_seed() {
        use rand::SeedableRng;
        use rand_chacha::ChaCha8Rng;

        let mut store = ParameterStore::new(CityParams::default()).unwrap();
        let seen = Rc::new(Cell::new(-1_i64));
        let seen_in = Rc::clone(&seen);
        store.on_change(move |p| seen_in.set(p.random_seed));

        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let seed = store.randomize_seed(&mut rng);
        assert_eq!(seen.get(), seed);
        assert!((0..10_000).contains(&seed));
    }

    #[test]
    fn test_invalid_initial_record_rejected() {
        let mut bad = CityParams::default();
        bad.building_density = 2.0;
        assert!(ParameterStore::new(bad).is_err());
    }
}
