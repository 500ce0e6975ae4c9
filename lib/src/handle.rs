// Copyright (c) 2026 The pintan Developers

use std::time::Duration;

use log::{debug, info, warn};
use zeroize::Zeroizing;

use pintan_core::{
    dialog::{DialogContext, MessageQueue, TaskId},
    passport::{DialogEvent, Driver, Passport},
};
use pintan_proto::{prelude::*, query::TAN_RESPONSE};

use crate::{Error, Exchange, Request};

/// [DialogHandle] drives PIN/TAN dialogs against a bank via an [Exchange],
/// firing [DialogEvent]s into the wrapped [Passport]
pub struct DialogHandle<T: Exchange, D: Driver> {
    t: T,
    passport: Passport<D>,
    request_timeout_s: u64,
}

/// Default request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_S: u64 = 30;

impl<T: Exchange + Send + Sync, D: Driver> DialogHandle<T, D> {
    /// Create a new handle using the provided exchange and passport
    pub fn new(t: T, passport: Passport<D>) -> Self {
        Self {
            t,
            passport,
            request_timeout_s: DEFAULT_REQUEST_TIMEOUT_S,
        }
    }

    /// Set the timeout applied to each bank request
    pub fn with_request_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_s = seconds;
        self
    }

    pub fn passport(&self) -> &Passport<D> {
        &self.passport
    }

    pub fn passport_mut(&mut self) -> &mut Passport<D> {
        &mut self.passport
    }

    /// Release the exchange and passport
    pub fn into_inner(self) -> (T, Passport<D>) {
        (self.t, self.passport)
    }

    /// Run a dialog initialisation with the provided template, repeating
    /// it while the passport requests a restart.
    ///
    /// `queue` carries tasks sent within the dialog where these affect the
    /// initialisation (administrative SCA segments).
    pub async fn init(
        &mut self,
        template: DialogTemplate,
        queue: Option<MessageQueue>,
    ) -> Result<DialogContext, Error<T::Error>> {
        let mut ctx = DialogContext::new(template);
        ctx.queue = queue;

        let max_restarts = self.passport.config().max_restarts;
        let mut restarts = 0;

        loop {
            let template = match ctx.init.as_mut() {
                Some(init) => {
                    init.fields.clear();
                    init.template
                }
                None => template,
            };

            info!("dialog init ({})", template);

            self.passport.update(DialogEvent::MessageCreated, &mut ctx)?;

            let fields = ctx
                .init
                .as_ref()
                .map(|i| i.fields.clone())
                .unwrap_or_default();

            let status = self
                .exchange(Request::Init { template, fields }, ctx.anonymous)
                .await?;
            ctx.status = Some(status);

            self.passport.update(DialogEvent::MessageSent, &mut ctx)?;

            if !ctx.take_repeat() {
                break;
            }

            if restarts >= max_restarts {
                warn!("dialog init repeated {} times, giving up", restarts);
                return Err(Error::TooManyRestarts(restarts));
            }
            restarts += 1;

            debug!("repeating dialog init ({}/{})", restarts, max_restarts);
        }

        Ok(ctx)
    }

    /// Send a batch of business tasks, returning the patched queue and the
    /// status of each sent message
    pub async fn jobs(
        &mut self,
        queue: MessageQueue,
    ) -> Result<(MessageQueue, Vec<ReplyStatus>), Error<T::Error>> {
        let mut ctx = DialogContext::with_queue(queue);

        self.passport.update(DialogEvent::JobsCreated, &mut ctx)?;

        let mut replies = vec![];

        for index in 0.. {
            let tasks = match ctx.queue.as_ref() {
                Some(q) if index < q.messages().len() => q
                    .message_tasks(index)
                    .map(|(id, t)| (id, t.clone()))
                    .collect::<Vec<_>>(),
                _ => break,
            };

            info!(
                "sending message {} ({})",
                index,
                tasks
                    .iter()
                    .map(|(_, t)| t.code.as_str())
                    .collect::<Vec<_>>()
                    .join(",")
            );

            let req = Request::Message {
                tasks: tasks.iter().map(|(_, t)| t.clone()).collect(),
            };
            let status = self.exchange(req, false).await?;

            // Pick up challenges and forward order references to step two
            let res = status.data.find(TAN_RESPONSE);
            if !res.is_empty() {
                let ids: Vec<TaskId> = tasks
                    .iter()
                    .filter(|(_, t)| {
                        t.tan_request()
                            .map(|r| r.process != TanProcess::Process2Step2)
                            .unwrap_or(false)
                    })
                    .map(|(id, _)| *id)
                    .collect();

                for id in ids {
                    self.take_challenge(&res);

                    let order_ref = res.get("orderref").unwrap_or_default();
                    if let Some(q) = ctx.queue.as_mut() {
                        if let Some(step2) = q.forward_order_ref(id, order_ref) {
                            debug!("forwarded order ref '{}' {} -> {}", order_ref, id, step2);
                        }
                    }
                }
            }

            ctx.status = Some(status.clone());
            self.passport.update(DialogEvent::MessageSent, &mut ctx)?;

            replies.push(status);
        }

        Ok((ctx.queue.unwrap_or_default(), replies))
    }

    fn take_challenge(&mut self, res: &Data) {
        let c = self.passport.challenge_data_mut();
        c.set_challenge(res.get("challenge"));
        c.set_challenge_hhd_uc(res.get("challenge_hhd_uc"));
        c.set_order_ref(res.get("orderref"));
    }

    /// Encode, sign and send a single message
    async fn exchange(
        &mut self,
        req: Request,
        anonymous: bool,
    ) -> Result<ReplyStatus, Error<T::Error>> {
        let msg = self.t.encode(&req).await.map_err(Error::Transport)?;

        let signature = match anonymous || self.passport.is_anonymous() {
            true => Zeroizing::new(String::new()),
            false => self.passport.sign(&msg)?,
        };

        debug!("sending {} byte message", msg.len());

        let data = tokio::time::timeout(
            Duration::from_secs(self.request_timeout_s),
            self.t.send(&msg, &signature),
        )
        .await?
        .map_err(Error::Transport)?;

        let status = ReplyStatus::parse(data);
        if !status.is_ok() {
            warn!("bank reported errors: {}", status.error_string());
        }

        Ok(status)
    }
}
