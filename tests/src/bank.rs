// Copyright (c) 2026 The pintan Developers

//! Mock bank [Exchange] replying from a script

use std::{collections::VecDeque, sync::Mutex};

use async_trait::async_trait;
use log::{debug, trace};

use pintan::{Exchange, Request};
use pintan_proto::prelude::*;

use crate::{driver::encode_task, Error};

/// Message as received by the [MockBank]
#[derive(Clone, PartialEq, Debug)]
pub struct Received {
    pub message: String,
    pub signature: String,
}

impl Received {
    /// PIN part of the signature
    pub fn pin(&self) -> &str {
        self.signature.split('|').next().unwrap_or_default()
    }

    /// TAN part of the signature
    pub fn tan(&self) -> &str {
        self.signature.split('|').nth(1).unwrap_or_default()
    }
}

#[derive(Default)]
struct State {
    replies: VecDeque<Data>,
    requests: Vec<Request>,
    received: Vec<Received>,
}

/// Mock bank returning scripted replies in order
#[derive(Default)]
pub struct MockBank {
    state: Mutex<State>,
}

impl MockBank {
    pub fn new(replies: impl IntoIterator<Item = Data>) -> Self {
        Self {
            state: Mutex::new(State {
                replies: replies.into_iter().collect(),
                ..Default::default()
            }),
        }
    }

    /// Requests encoded so far
    pub fn requests(&self) -> Vec<Request> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Messages received so far
    pub fn received(&self) -> Vec<Received> {
        self.state.lock().unwrap().received.clone()
    }

    /// Number of replies not yet consumed
    pub fn remaining(&self) -> usize {
        self.state.lock().unwrap().replies.len()
    }
}

#[async_trait]
impl Exchange for MockBank {
    type Error = Error;

    async fn encode(&self, req: &Request) -> Result<Vec<u8>, Self::Error> {
        self.state.lock().unwrap().requests.push(req.clone());

        let msg = encode_request(req);
        trace!("encoded: {}", String::from_utf8_lossy(&msg));

        Ok(msg)
    }

    async fn send(&self, msg: &[u8], signature: &str) -> Result<Data, Self::Error> {
        let mut s = self.state.lock().unwrap();

        let index = s.received.len();
        s.received.push(Received {
            message: String::from_utf8_lossy(msg).to_string(),
            signature: signature.to_string(),
        });

        let reply = s.replies.pop_front().ok_or(Error::NoReply(index))?;

        debug!("message {}: replying with {} fields", index, reply.len());

        Ok(reply)
    }
}

/// Encode a request between message header and trailer segments
pub fn encode_request(req: &Request) -> Vec<u8> {
    let mut segments: Vec<Vec<u8>> = vec![b"HNHBK:1:3+000000000000+300+0+1'".to_vec()];

    match req {
        Request::Init { template, fields } => {
            match template {
                DialogTemplate::End => segments.push(b"HKEND:2:1+0'".to_vec()),
                _ => {
                    segments.push(b"HKIDN:2:2+280:12345678+user+0+1'".to_vec());
                    segments.push(b"HKVVB:3:3+0+0+0+pintan+0.1'".to_vec());
                }
            }

            // Optional TAN segment, present where requested
            for (k, _) in fields.iter() {
                if let Some(v) = k.strip_prefix("TAN2Step").filter(|v| !v.contains('.')) {
                    let process = fields.get(&format!("{k}.process")).unwrap_or_default();
                    let code = fields.get(&format!("{k}.ordersegcode")).unwrap_or_default();
                    let n = segments.len() + 1;
                    segments.push(format!("HKTAN:{n}:{v}+{process}+{code}'").into_bytes());
                }
            }
        }
        Request::Message { tasks } => {
            for t in tasks {
                let n = segments.len() + 1;
                segments.push(encode_task(t, n));
            }
        }
    }

    let n = segments.len() + 1;
    segments.push(format!("HNHBS:{n}:1+1'").into_bytes());

    segments.concat()
}
