use anyhow::anyhow;
use std::time::Duration;
use tokio::time::Instant;

const MAX_UNANSWERED_PINGS: u8 = 2;

///
/// Ping/pong bookkeeping of a single connection.
/// Every heartbeat round uses a new payload, so a late pong
/// of an older round doesn't count as an answer.
///
pub struct Heartbeat {
    interval: Duration,
    deadline: Instant,
    payload: u32,
    unanswered: u8,
}

impl Heartbeat {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: Instant::now() + interval,
            payload: 0,
            unanswered: 0,
        }
    }

    ///
    /// Time of the next ping
    ///
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    ///
    /// ### Returns
    /// Payload of the ping to send
    ///
    /// ### Errors
    /// When previous pings were left unanswered
    ///
    pub fn ping(&mut self) -> anyhow::Result<Vec<u8>> {
        if self.unanswered >= MAX_UNANSWERED_PINGS {
            anyhow::bail!("user unresponsive");
        }

        if self.unanswered == 0 {
            self.payload = self.payload.wrapping_add(1);
        }
        self.unanswered += 1;
        self.deadline = Instant::now() + self.interval;

        Ok(self.payload.to_be_bytes().to_vec())
    }

    pub fn pong(&mut self, payload: &[u8]) -> anyhow::Result<()> {
        let payload = <[u8; 4]>::try_from(payload).map_err(|_| {
            anyhow!(
                "pong payload length invalid: len {} expected {}",
                payload.len(),
                std::mem::size_of::<u32>()
            )
        })?;
        let payload = u32::from_be_bytes(payload);

        if self.unanswered == 0 {
            tracing::trace!("pong was not expected");
            return Ok(());
        }

        if payload != self.payload {
            tracing::trace!(
                pong_payload = payload,
                ping_payload = self.payload,
                "pong of an older heartbeat round"
            );
            return Ok(());
        }

        self.unanswered = 0;
        self.deadline = Instant::now() + self.interval;

        Ok(())
    }
}
