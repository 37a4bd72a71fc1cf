//! Performance benchmarks for the shared-state hot paths

use server::game::GameSession;
use server::leaderboard::Leaderboard;
use server::queue::RequestQueue;
use server::words::WordEntry;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

/// Benchmarks leaderboard updates under contention from many threads
#[test]
fn benchmark_leaderboard_contention() {
    let board = Arc::new(Leaderboard::new());
    let users: Vec<String> = (0..16).map(|i| format!("user{}", i)).collect();
    for user in &users {
        board.create(user);
    }

    let threads = 8;
    let iterations = 20_000;
    let start = Instant::now();

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let board = Arc::clone(&board);
            let users = users.clone();
            thread::spawn(move || {
                for i in 0..iterations {
                    let user = &users[(t + i) % users.len()];
                    if i % 3 == 0 {
                        board.record_win(user).unwrap();
                    } else {
                        board.record_loss(user).unwrap();
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let duration = start.elapsed();
    println!(
        "Leaderboard updates: {} in {:?} ({:.2} ns/update)",
        threads * iterations,
        duration,
        duration.as_nanos() as f64 / (threads * iterations) as f64
    );

    let played: u32 = board.snapshot().iter().map(|r| r.games_played).sum();
    assert_eq!(played as usize, threads * iterations);

    // Should complete in under 2 seconds even on slow CI machines
    assert!(duration.as_millis() < 2000);
}

/// Benchmarks producer/consumer throughput of the request queue
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn benchmark_queue_throughput() {
    let queue = Arc::new(RequestQueue::new());
    let items = 100_000u64;
    let consumers = 4;

    let start = Instant::now();

    let handles: Vec<_> = (0..consumers)
        .map(|_| {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move {
                let mut sum = 0u64;
                loop {
                    let item: u64 = queue.dequeue().await;
                    if item == u64::MAX {
                        return sum;
                    }
                    sum += item;
                }
            })
        })
        .collect();

    for i in 0..items {
        queue.enqueue(i);
    }
    for _ in 0..consumers {
        queue.enqueue(u64::MAX);
    }

    let mut total = 0;
    for handle in handles {
        total += handle.await.unwrap();
    }

    let duration = start.elapsed();
    println!(
        "Queue throughput: {} items in {:?} ({:.2} ns/item)",
        items,
        duration,
        duration.as_nanos() as f64 / items as f64
    );

    assert_eq!(total, items * (items - 1) / 2);
    assert!(duration.as_millis() < 2000);
}

/// Benchmarks full games against the board logic
#[test]
fn benchmark_game_turns() {
    let entry = WordEntry::new("profession", "astronaut");
    let iterations = 10_000;
    let start = Instant::now();

    for _ in 0..iterations {
        let mut game = GameSession::new("bench", &entry);
        for letter in "aeiounrstpfl".chars() {
            game.guess(letter);
        }
    }

    let duration = start.elapsed();
    println!(
        "Game turns: {} games in {:?} ({:.2} μs/game)",
        iterations,
        duration,
        duration.as_micros() as f64 / iterations as f64
    );

    assert!(duration.as_millis() < 1000);
}
