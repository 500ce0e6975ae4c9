// Copyright (c) 2026 The pintan Developers

//! Current TAN method selection

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use pintan_proto::ONE_STEP_METHOD;

use super::{Driver, Error, Passport};

/// Display name of the one-step method
pub const ONE_STEP_NAME: &str = "PIN/TAN one-step";

/// Selectable TAN method option
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MethodOption {
    pub id: String,
    pub name: String,
}

impl MethodOption {
    fn one_step() -> Self {
        Self {
            id: ONE_STEP_METHOD.to_string(),
            name: ONE_STEP_NAME.to_string(),
        }
    }
}

/// Render options for the selection callback (`id:name|id:name`)
pub fn render_options(options: &[MethodOption]) -> String {
    let mut s = String::new();
    for (i, o) in options.iter().enumerate() {
        if i > 0 {
            s.push('|');
        }
        s.push_str(&o.id);
        s.push(':');
        s.push_str(&o.name);
    }
    s
}

impl<DRV: Driver> Passport<DRV> {
    /// Build the candidate list (one-step where allowed and enrolled, and
    /// enrolled catalog methods) and the fallback list (every catalog method)
    pub fn method_options(&self) -> (Vec<MethodOption>, Vec<MethodOption>) {
        let mut candidates = Vec::new();
        let mut fallback = Vec::new();

        if self.is_one_step_allowed()
            && (self.enrolled.is_empty() || self.enrolled.contains(ONE_STEP_METHOD))
        {
            candidates.push(MethodOption::one_step());
        }

        // Catalog iteration is ordered by identifier
        for m in self.catalog.iter() {
            let o = MethodOption {
                id: m.id.clone(),
                name: m.name().to_string(),
            };

            if self.enrolled.contains(&m.id) {
                candidates.push(o.clone());
            }
            fallback.push(o);
        }

        (candidates, fallback)
    }

    /// Fetch the current TAN method, selecting one where none is set or
    /// `recheck` is requested
    pub fn current_method(&mut self, recheck: bool) -> Result<String, Error> {
        if let (Some(c), false) = (&self.current, recheck) {
            return Ok(c.clone());
        }

        #[cfg(feature = "log")]
        log::debug!("(re)checking selected TAN method");

        let (candidates, fallback) = self.method_options();

        match candidates.len() {
            // No enrolled methods known, fall back to the catalog
            0 if !fallback.is_empty() => {
                #[cfg(feature = "log")]
                log::info!(
                    "no allowed TAN methods known, asking user to choose from: {}",
                    render_options(&fallback)
                );

                let selected = self.choose_method(&fallback)?;
                self.current = Some(selected);
                self.auto_selected = false;
            }
            0 => {
                #[cfg(feature = "log")]
                log::warn!("no TAN methods known, defaulting to one-step");

                self.current = Some(ONE_STEP_METHOD.to_string());
                self.auto_selected = true;
            }
            1 => {
                let m = &candidates[0];

                #[cfg(feature = "log")]
                if let Some(c) = self.current.as_ref().filter(|c| **c != m.id) {
                    log::debug!("auto-selected TAN method {} differs from current {}", m.id, c);
                }

                self.current = Some(m.id.clone());
                self.auto_selected = true;
            }
            _ => {
                // Deliberate prior choices are kept while still available
                if let Some(c) = &self.current {
                    if !self.auto_selected && candidates.iter().any(|o| &o.id == c) {
                        return Ok(c.clone());
                    }
                }

                let selected = self.choose_method(&candidates)?;

                #[cfg(feature = "log")]
                log::debug!("manually selected TAN method {}", selected);

                self.current = Some(selected);
                self.auto_selected = false;
            }
        }

        Ok(self.current.clone().unwrap_or_default())
    }

    /// Ask the user to choose from `options`, failing where the choice
    /// is not among them
    fn choose_method(&mut self, options: &[MethodOption]) -> Result<String, Error> {
        let selected = self.drv.select_method(&render_options(options));

        match options.iter().find(|o| o.id == selected) {
            Some(o) => Ok(o.id.clone()),
            None => {
                #[cfg(feature = "log")]
                log::error!("selected TAN method not supported: {}", selected);
                Err(Error::InvalidSelection)
            }
        }
    }
}
