// Copyright (c) 2026 The pintan Developers

//! Per-dialog state and the outbound message queue
//!
//! A [DialogContext] is owned by the dialog driver and passed to the
//! [Passport][crate::passport::Passport] by mutable reference for each
//! [DialogEvent][crate::passport::DialogEvent].
//!
//! Tasks are stored in an arena within the [MessageQueue] and referenced by
//! [TaskId], so TAN request tasks can refer to the business task they
//! authorise (and to their second step) without aliasing.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use core::fmt::Write as _;

use pintan_proto::prelude::*;

/// Index of a task within a [MessageQueue]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct TaskId(pub usize);

impl core::fmt::Display for TaskId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Order account referenced by a business task
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Account {
    pub iban: String,
    pub bic: String,
    pub number: String,
    pub subnumber: String,
    pub blz: String,
    pub country: String,
}

/// TAN request (`HKTAN`) parameters
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TanRequest {
    pub process: TanProcess,
    /// Code of the segment this request refers to
    pub order_seg_code: String,
    /// Order hash, rendered as `B` followed by hex
    pub order_hash: Option<Vec<u8>>,
    pub order_account: Option<Account>,
    pub order_ref: String,
    pub not_last_tan: bool,
    pub challenge_class: String,
    /// Positional challenge class parameters
    pub challenge_params: Vec<String>,
    pub tan_media: String,

    /// Second step request for process variant 2
    pub step2: Option<TaskId>,
    /// Business task answered by this request
    pub task: Option<TaskId>,
}

impl TanRequest {
    /// Create an empty request with the provided process
    pub fn new(process: TanProcess) -> Self {
        Self {
            process,
            order_seg_code: String::new(),
            order_hash: None,
            order_account: None,
            order_ref: String::new(),
            not_last_tan: false,
            challenge_class: String::new(),
            challenge_params: Vec::new(),
            tan_media: String::new(),
            step2: None,
            task: None,
        }
    }

    /// Write request fields below `prefix` (`TAN2Step6`)
    pub fn write_fields(&self, fields: &mut Data, prefix: &str) {
        let account = self.order_account.clone().unwrap_or_default();
        let hash = match &self.order_hash {
            Some(h) => render_binary(h),
            None => String::new(),
        };

        // Force the optional segment into the message
        fields.set(prefix, "requested");

        let entries = [
            ("process", self.process.code().to_string()),
            ("ordersegcode", self.order_seg_code.clone()),
            ("OrderAccount.bic", account.bic),
            ("OrderAccount.iban", account.iban),
            ("OrderAccount.number", account.number),
            ("OrderAccount.subnumber", account.subnumber),
            ("OrderAccount.KIK.blz", account.blz),
            ("OrderAccount.KIK.country", account.country),
            ("orderhash", hash),
            ("orderref", self.order_ref.clone()),
            (
                "notlasttan",
                if self.not_last_tan { "J" } else { "N" }.to_string(),
            ),
            ("challengeklass", self.challenge_class.clone()),
            ("tanmedia", self.tan_media.clone()),
        ];

        for (k, v) in entries {
            fields.set(alloc::format!("{prefix}.{k}"), v);
        }

        for (i, p) in self.challenge_params.iter().enumerate() {
            fields.set(
                alloc::format!("{prefix}.ChallengeKlassParams.param{}", i + 1),
                p.as_str(),
            );
        }
    }
}

/// Render binary data in field notation (`B` followed by upper-case hex)
pub fn render_binary(data: &[u8]) -> String {
    let mut s = String::with_capacity(1 + data.len() * 2);
    s.push('B');
    for b in data {
        let _ = write!(s, "{b:02X}");
    }
    s
}

/// Task kind
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TaskKind {
    /// Business transaction
    Business,
    /// TAN request
    Tan(TanRequest),
}

/// Queued task (one segment in an outbound message)
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Task {
    /// Segment code (`HKCCS`)
    pub code: String,
    /// Caller-provided identifier, passed on to generated TAN requests
    pub external_id: Option<String>,
    /// Segment version
    pub seg_version: u32,
    /// Business parameters keyed by field path
    pub params: Data,
    /// Order account of the business transaction
    pub order_account: Option<Account>,
    /// Set once a TAN request has been generated for this task
    pub tan_applied: bool,
    pub kind: TaskKind,
}

impl Task {
    /// Create a business task
    pub fn business(code: &str, seg_version: u32) -> Self {
        Self {
            code: code.to_string(),
            external_id: None,
            seg_version,
            params: Data::new(),
            order_account: None,
            tan_applied: false,
            kind: TaskKind::Business,
        }
    }

    /// Create a TAN request task
    pub fn tan(seg_version: u32, req: TanRequest) -> Self {
        Self {
            code: String::from("HKTAN"),
            external_id: None,
            seg_version,
            params: Data::new(),
            order_account: None,
            tan_applied: false,
            kind: TaskKind::Tan(req),
        }
    }

    pub fn with_external_id(mut self, id: &str) -> Self {
        self.external_id = Some(id.to_string());
        self
    }

    pub fn with_param(mut self, path: &str, value: &str) -> Self {
        self.params.set(path, value);
        self
    }

    pub fn with_order_account(mut self, account: Account) -> Self {
        self.order_account = Some(account);
        self
    }

    /// TAN request parameters, if this is a TAN request task
    pub fn tan_request(&self) -> Option<&TanRequest> {
        match &self.kind {
            TaskKind::Tan(r) => Some(r),
            TaskKind::Business => None,
        }
    }

    pub fn tan_request_mut(&mut self) -> Option<&mut TanRequest> {
        match &mut self.kind {
            TaskKind::Tan(r) => Some(r),
            TaskKind::Business => None,
        }
    }
}

/// Outbound message, an ordered list of tasks
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Message {
    pub tasks: Vec<TaskId>,
}

/// Queue of outbound messages for one dialog
#[derive(Clone, PartialEq, Debug, Default)]
pub struct MessageQueue {
    tasks: Vec<Task>,
    messages: Vec<Message>,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task to the arena without queueing it
    pub fn alloc(&mut self, task: Task) -> TaskId {
        self.tasks.push(task);
        TaskId(self.tasks.len() - 1)
    }

    /// Append a new, empty message, returning its index
    pub fn push_message(&mut self) -> usize {
        self.messages.push(Message::default());
        self.messages.len() - 1
    }

    /// Insert an empty message before the message at `index`,
    /// returning the index of the new message
    pub fn insert_before(&mut self, index: usize) -> usize {
        self.messages.insert(index, Message::default());
        index
    }

    /// Insert an empty message after the message at `index`,
    /// returning the index of the new message
    pub fn insert_after(&mut self, index: usize) -> usize {
        self.messages.insert(index + 1, Message::default());
        index + 1
    }

    /// Append a task to the message at `index`
    pub fn append(&mut self, index: usize, task: Task) -> TaskId {
        let id = self.alloc(task);
        if let Some(m) = self.messages.get_mut(index) {
            m.tasks.push(id);
        }
        id
    }

    /// Append a previously allocated task to the message at `index`
    pub fn attach(&mut self, index: usize, id: TaskId) {
        if let Some(m) = self.messages.get_mut(index) {
            m.tasks.push(id);
        }
    }

    /// Queue a task into a new message of its own
    pub fn push(&mut self, task: Task) -> TaskId {
        let index = self.push_message();
        self.append(index, task)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(id.0)
    }

    pub fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.get_mut(id.0)
    }

    /// Iterate over the tasks of the message at `index`
    pub fn message_tasks(&self, index: usize) -> impl Iterator<Item = (TaskId, &Task)> {
        self.messages
            .get(index)
            .into_iter()
            .flat_map(|m| m.tasks.iter())
            .filter_map(|id| self.task(*id).map(|t| (*id, t)))
    }

    /// Find the first queued task with the provided segment code
    pub fn find_task(&self, code: &str) -> Option<TaskId> {
        self.messages
            .iter()
            .flat_map(|m| m.tasks.iter())
            .find(|id| self.task(**id).map(|t| t.code == code).unwrap_or(false))
            .copied()
    }

    /// Copy the order reference received in reply to a step one TAN request
    /// into the linked step two request, returning the step two task
    pub fn forward_order_ref(&mut self, step1: TaskId, order_ref: &str) -> Option<TaskId> {
        let step2 = self.task(step1)?.tan_request()?.step2?;
        let req = self.task_mut(step2)?.tan_request_mut()?;
        req.order_ref = order_ref.to_string();

        Some(step2)
    }
}

/// Dialog initialisation message in preparation
#[derive(Clone, PartialEq, Debug)]
pub struct DialogInit {
    pub template: DialogTemplate,
    /// Fields written into the outgoing message
    pub fields: Data,
}

impl DialogInit {
    pub fn new(template: DialogTemplate) -> Self {
        Self {
            template,
            fields: Data::new(),
        }
    }
}

/// Transient per-dialog state
#[derive(Clone, PartialEq, Debug, Default)]
pub struct DialogContext {
    /// Dialog runs without authentication
    pub anonymous: bool,
    /// Dialog initialisation message, where one is being built
    pub init: Option<DialogInit>,
    /// Business tasks of the dialog
    pub queue: Option<MessageQueue>,
    /// Status of the most recently sent message
    pub status: Option<ReplyStatus>,
    /// SCA negotiation step
    pub sca: Option<ScaStep>,

    repeat: bool,
}

impl DialogContext {
    /// Create a context for a dialog initialised with the provided template
    pub fn new(template: DialogTemplate) -> Self {
        Self {
            anonymous: template == DialogTemplate::InitAnon,
            init: Some(DialogInit::new(template)),
            ..Default::default()
        }
    }

    /// Create a context for a batch of business tasks
    pub fn with_queue(queue: MessageQueue) -> Self {
        Self {
            queue: Some(queue),
            ..Default::default()
        }
    }

    /// Current initialisation template
    pub fn template(&self) -> Option<DialogTemplate> {
        self.init.as_ref().map(|i| i.template)
    }

    /// Request the dialog be repeated
    pub fn set_repeat(&mut self) {
        self.repeat = true;
    }

    /// Check whether a repeat has been requested without consuming it
    pub fn repeat(&self) -> bool {
        self.repeat
    }

    /// Consume the repeat flag
    pub fn take_repeat(&mut self) -> bool {
        core::mem::take(&mut self.repeat)
    }
}
