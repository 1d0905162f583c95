//! Status reconciliation across a classified batch

use hirelog_domain::{Email, Status};
use std::cmp::Reverse;
use std::collections::HashMap;

/// Mark confirmations whose outcome arrived in a later email as `Applied`
///
/// For each company, emails are walked from newest to oldest. Every `Reject`
/// or `Accepted` email closes the nearest older `Pending` email of the same
/// company. Pending emails left unclaimed keep their status. Emails without a
/// company are ignored.
///
/// Returns the number of emails changed.
pub fn reconcile_statuses(emails: &mut [Email]) -> usize {
    let mut by_company: HashMap<&str, Vec<usize>> = HashMap::new();
    for (index, email) in emails.iter().enumerate() {
        if !email.company.is_empty() {
            by_company.entry(email.company.as_str()).or_default().push(index);
        }
    }

    let mut to_close = Vec::new();
    for indices in by_company.values_mut() {
        indices.sort_by_key(|&i| Reverse(emails[i].record.sent_time));

        let mut open_outcomes = 0usize;
        for &index in indices.iter() {
            let status = emails[index].status;
            if status.is_outcome() {
                open_outcomes += 1;
            } else if status == Status::Pending && open_outcomes > 0 {
                open_outcomes -= 1;
                to_close.push(index);
            }
        }
    }

    for &index in &to_close {
        emails[index].status = Status::Applied;
    }
    to_close.len()
}
