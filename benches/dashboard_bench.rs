//! Benchmarks for panel projection and push update application
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use interview_dashboard::live::{handle_message, set_interview_patch, PushMessage};
use interview_dashboard::model::{Appointment, Appointments, Day, Interview, Interviewers};
use interview_dashboard::projection::{project, selectors};
use interview_dashboard::{DashboardState, Focus, StatePatch, Store};

const SLOTS_PER_DAY: u32 = 8;

fn create_state(days: u32) -> DashboardState {
    let mut appointments = Appointments::new();
    let mut day_list = Vec::with_capacity(days as usize);

    for d in 0..days {
        let ids: Vec<u32> = (0..SLOTS_PER_DAY).map(|s| d * SLOTS_PER_DAY + s + 1).collect();
        for (slot, id) in ids.iter().enumerate() {
            let appointment = Appointment::new(*id, format!("{}pm", slot + 1));
            let appointment = if id % 3 == 0 {
                appointment.booked(Interview::new(format!("Student {}", id), 1))
            } else {
                appointment
            };
            appointments.insert(*id, appointment);
        }
        day_list.push(Day::new(d + 1, format!("Day {}", d + 1)).appointments(ids));
    }

    for day in &mut day_list {
        day.spots = day.count_spots(&appointments);
    }

    let mut state = DashboardState::default();
    StatePatch::new()
        .loading(false)
        .days(day_list)
        .appointments(appointments)
        .interviewers(Interviewers::new())
        .apply_to(&mut state);
    state
}

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");

    for days in [5, 50, 500] {
        let state = create_state(days);
        group.throughput(Throughput::Elements(u64::from(days * SLOTS_PER_DAY)));

        group.bench_with_input(BenchmarkId::new("all_panels", days), &state, |b, state| {
            b.iter(|| project(black_box(state)))
        });

        group.bench_with_input(
            BenchmarkId::new("least_popular_time_slot", days),
            &state,
            |b, state| b.iter(|| selectors::least_popular_time_slot(black_box(state))),
        );
    }

    let mut focused = create_state(50);
    focused.focus = Focus::panel(3);
    group.bench_function("focused_panel_50", |b| b.iter(|| project(black_box(&focused))));

    group.finish();
}

fn bench_updates(c: &mut Criterion) {
    let mut group = c.benchmark_group("updates");
    let state = create_state(50);

    group.bench_function("set_interview_patch", |b| {
        b.iter(|| {
            set_interview_patch(
                black_box(&state),
                black_box(17),
                Some(Interview::new("Alice", 2)),
            )
        })
    });

    let booking = serde_json::to_string(&PushMessage::set_interview(
        17,
        Some(Interview::new("Alice", 2)),
    ))
    .unwrap();
    let cancel = serde_json::to_string(&PushMessage::set_interview(17, None)).unwrap();

    group.bench_function("handle_message_toggle", |b| {
        let store = Store::with_state(create_state(50));
        b.iter(|| {
            handle_message(&store, black_box(&booking));
            handle_message(&store, black_box(&cancel));
        })
    });

    group.bench_function("parse_message", |b| {
        b.iter(|| PushMessage::parse(black_box(&booking)))
    });

    group.finish();
}

criterion_group!(benches, bench_projection, bench_updates);
criterion_main!(benches);
