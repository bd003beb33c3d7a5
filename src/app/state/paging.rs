use gallery_core::load_more::Ticket;
use std::collections::{BTreeSet, HashMap};

/// Item offsets handed to fetches, with the pages of failed fetches queued again.
///
/// Every offset is a multiple of `page_size`; the first claim may span
/// several pages when the initial load is a whole number of them.
#[derive(Debug)]
pub(in crate::app) struct PageCursor {
    page_size: u32,
    next: u32,
    missed: BTreeSet<u32>,
    pending: HashMap<Ticket, (u32, u32)>,
}

impl PageCursor {
    pub(in crate::app) fn new(page_size: u32) -> Self {
        PageCursor {
            page_size: page_size.max(1),
            next: 0,
            missed: BTreeSet::new(),
            pending: HashMap::new(),
        }
    }

    /// Offset for a fetch of `limit` items; missed pages are served first.
    pub(in crate::app) fn claim(&mut self, ticket: Ticket, limit: u32) -> u32 {
        let retry = if limit == self.page_size {
            self.missed.pop_first()
        } else {
            None
        };
        let offset = match retry {
            Some(offset) => offset,
            None => {
                let offset = self.next;
                self.next = self.next.saturating_add(limit);
                offset
            }
        };
        self.pending.insert(ticket, (offset, limit));
        offset
    }

    /// Forgets `ticket` after its items arrived.
    ///
    /// A short page is the end of the listing, so nothing past it is lost.
    pub(in crate::app) fn complete(&mut self, ticket: Ticket) {
        self.pending.remove(&ticket);
    }

    /// Queues every page `ticket` covered so later fetches ask for them again.
    pub(in crate::app) fn fail(&mut self, ticket: Ticket) {
        let Some((offset, limit)) = self.pending.remove(&ticket) else {
            return;
        };
        let end = offset.saturating_add(limit);
        self.missed
            .extend((offset..end).step_by(self.page_size as usize));
    }

    /// Items claimed by fresh fetches, excluding retries.
    pub(in crate::app) fn requested(&self) -> u32 {
        self.next
    }

    pub(in crate::app) fn missed_len(&self) -> usize {
        self.missed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_advance_in_request_order() {
        let mut cursor = PageCursor::new(10);
        assert_eq!(cursor.claim(Ticket(1), 30), 0);
        assert_eq!(cursor.claim(Ticket(2), 10), 30);
        assert_eq!(cursor.claim(Ticket(3), 10), 40);
        assert_eq!(cursor.requested(), 50);
    }

    #[test]
    fn failed_pages_are_claimed_again_first() {
        let mut cursor = PageCursor::new(10);
        cursor.claim(Ticket(1), 30);
        cursor.complete(Ticket(1));
        cursor.claim(Ticket(2), 10);
        cursor.claim(Ticket(3), 10);
        cursor.fail(Ticket(2));
        cursor.complete(Ticket(3));

        assert_eq!(cursor.missed_len(), 1);
        assert_eq!(cursor.claim(Ticket(4), 10), 30);
        assert_eq!(cursor.claim(Ticket(5), 10), 50);
    }

    #[test]
    fn failed_first_load_splits_into_pages() {
        let mut cursor = PageCursor::new(12);
        cursor.claim(Ticket(1), 24);
        cursor.fail(Ticket(1));
        assert_eq!(cursor.missed_len(), 2);
        assert_eq!(cursor.claim(Ticket(2), 12), 0);
        assert_eq!(cursor.claim(Ticket(3), 12), 12);
        assert_eq!(cursor.claim(Ticket(4), 12), 24);
    }

    #[test]
    fn unknown_tickets_are_ignored() {
        let mut cursor = PageCursor::new(12);
        cursor.fail(Ticket(9));
        cursor.complete(Ticket(9));
        assert_eq!(cursor.missed_len(), 0);
        assert_eq!(cursor.requested(), 0);
    }
}
