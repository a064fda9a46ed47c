// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use avionix_core::TickTask;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_drop_signals_cancellation() -> anyhow::Result<()> {
    // Arrange
    let finished = Arc::new(AtomicBool::new(false));
    let flag = finished.clone();
    let task = TickTask::spawn(move |cancel| async move {
        cancel.cancelled().await;
        flag.store(true, Ordering::SeqCst);
    });
    let token = task.token().clone();

    // Act
    drop(task);
    tokio::time::timeout(Duration::from_secs(1), async {
        while !finished.load(Ordering::SeqCst) {
            tokio::task::yield_now().await;
        }
    })
    .await?;

    // Assert
    assert!(token.is_cancelled());
    Ok(())
}

#[tokio::test]
async fn test_cancel_keeps_handle_usable() {
    let task = TickTask::spawn(|cancel| async move {
        cancel.cancelled().await;
    });

    assert!(!task.is_cancelled());
    task.cancel();
    task.cancel();
    assert!(task.is_cancelled());
}
