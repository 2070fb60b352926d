use std::sync::Arc;

use crate::state::RefreshGate;

#[test]
fn second_acquire_is_rejected_while_permit_lives() {
    let gate = RefreshGate::new();

    let permit = gate.try_acquire();
    assert!(permit.is_some());
    assert!(gate.try_acquire().is_none());

    drop(permit);
    assert!(gate.try_acquire().is_some());
}

#[test]
fn permit_releases_on_early_return() {
    let gate = RefreshGate::new();

    fn bails_out(gate: &RefreshGate) -> Option<()> {
        let _permit = gate.try_acquire()?;
        None?;
        Some(())
    }

    assert!(bails_out(&gate).is_none());
    assert!(gate.try_acquire().is_some());
}

#[tokio::test]
async fn concurrent_refreshes_collapse_to_one() {
    let gate = Arc::new(RefreshGate::new());

    let mut acquired = 0;
    let mut handles = Vec::new();
    for _ in 0..8 {
        let gate = Arc::clone(&gate);
        handles.push(tokio::spawn(async move {
            let permit = gate.try_acquire();
            let got_it = permit.is_some();
            // Hold the permit across a yield like a real capture would
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            got_it
        }));
    }

    for handle in handles {
        if handle.await.expect("task panicked") {
            acquired += 1;
        }
    }

    assert_eq!(acquired, 1);
}
