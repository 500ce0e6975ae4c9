// Copyright (c) 2026 The pintan Developers

//! Scripted [Driver] recording user interactions

use std::collections::VecDeque;

use log::debug;

use pintan_core::{dialog::Task, passport::Driver, Error};

/// PIN used by default in tests
pub const TEST_PIN: &str = "12345";

/// [Driver] answering prompts from scripted responses
#[derive(Clone, PartialEq, Debug, Default)]
pub struct TestDriver {
    pub pin: String,
    pub tans: VecDeque<String>,
    pub selections: VecDeque<String>,
    pub media: Option<String>,

    pub pin_requests: usize,
    /// TAN prompts with the rendered flicker code
    pub tan_prompts: Vec<(String, Option<String>)>,
    /// Rendered method options per selection request
    pub select_prompts: Vec<String>,
    /// Default media names per media request
    pub media_prompts: Vec<String>,
    pub wrong_pins: usize,
    pub user_ids: Vec<String>,
}

impl TestDriver {
    pub fn new() -> Self {
        Self {
            pin: TEST_PIN.to_string(),
            ..Default::default()
        }
    }

    pub fn with_pin(mut self, pin: &str) -> Self {
        self.pin = pin.to_string();
        self
    }

    pub fn with_tans(mut self, tans: &[&str]) -> Self {
        self.tans.extend(tans.iter().map(|t| t.to_string()));
        self
    }

    pub fn with_selections(mut self, ids: &[&str]) -> Self {
        self.selections.extend(ids.iter().map(|t| t.to_string()));
        self
    }

    pub fn with_media(mut self, name: &str) -> Self {
        self.media = Some(name.to_string());
        self
    }
}

impl Driver for TestDriver {
    fn request_pin(&mut self) -> String {
        self.pin_requests += 1;
        self.pin.clone()
    }

    fn request_tan(&mut self, prompt: &str, flicker: Option<&str>) -> String {
        debug!("TAN requested: {:?} (flicker: {:?})", prompt, flicker);

        self.tan_prompts
            .push((prompt.to_string(), flicker.map(|f| f.to_string())));
        self.tans.pop_front().unwrap_or_default()
    }

    fn select_method(&mut self, options: &str) -> String {
        debug!("method selection requested: {}", options);

        self.select_prompts.push(options.to_string());
        self.selections.pop_front().unwrap_or_default()
    }

    fn request_tan_media(&mut self, default: &str) -> String {
        self.media_prompts.push(default.to_string());
        self.media.clone().unwrap_or_default()
    }

    fn wrong_pin(&mut self) {
        self.wrong_pins += 1;
    }

    fn user_id_changed(&mut self, ids: &str) {
        self.user_ids.push(ids.to_string());
    }

    fn encode_segment(&self, task: &Task) -> Result<Vec<u8>, Error> {
        Ok(encode_task(task, 1))
    }
}

/// Encode a task as a segment (`CODE:num:version+value+value'`), with
/// parameters in path order
pub fn encode_task(task: &Task, num: usize) -> Vec<u8> {
    let mut s = format!("{}:{}:{}", task.code, num, task.seg_version);
    for (_, v) in task.params.iter() {
        s.push('+');
        s.push_str(v);
    }
    s.push('\'');
    s.into_bytes()
}
