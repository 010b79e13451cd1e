use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rusqlite::Connection;
use tempfile::TempDir;

use arcdb::database::Migrator;
use arcdb::kv::{get_json, set_json, KvStore, MemoryStore, SqliteStore};

const POPULATED_SIZES: &[usize] = &[10, 100, 1000];
const MIGRATION_COUNTS: &[u32] = &[5, 25, 100];

fn setup_sqlite_store() -> (TempDir, SqliteStore) {
    let temp_dir = TempDir::new().expect("failed to create temporary directory");
    let store =
        SqliteStore::open(temp_dir.path().join("arc.db")).expect("failed to open temporary store");
    (temp_dir, store)
}

fn populate(store: &dyn KvStore, count: usize) {
    for index in 0..count {
        store
            .set(&format!("bench:{index}"), format!("value-{index}").as_bytes())
            .expect("failed to populate store");
    }
}

fn bench_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("kv_set");

    let memory = MemoryStore::new();
    group.bench_function("memory", |b| {
        b.iter(|| memory.set(black_box("bench:key"), black_box(b"value")));
    });

    let (_temp_dir, sqlite) = setup_sqlite_store();
    group.bench_function("sqlite", |b| {
        b.iter(|| sqlite.set(black_box("bench:key"), black_box(b"value")));
    });

    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("kv_get");

    for &size in POPULATED_SIZES {
        let memory = MemoryStore::new();
        populate(&memory, size);
        group.bench_with_input(BenchmarkId::new("memory", size), &size, |b, &count| {
            let key = format!("bench:{}", count - 1);
            b.iter(|| black_box(memory.get(&key)));
        });

        let (_temp_dir, sqlite) = setup_sqlite_store();
        populate(&sqlite, size);
        group.bench_with_input(BenchmarkId::new("sqlite", size), &size, |b, &count| {
            let key = format!("bench:{}", count - 1);
            b.iter(|| black_box(sqlite.get(&key)));
        });
    }

    group.finish();
}

fn bench_json_round_trip(c: &mut Criterion) {
    let store = MemoryStore::new();
    let payload: Vec<u64> = (0..64).collect();

    c.bench_function("kv_json_round_trip", |b| {
        b.iter(|| {
            set_json(&store, "bench:json", black_box(&payload)).expect("encode failed");
            let decoded: Vec<u64> = get_json(&store, "bench:json").expect("decode failed");
            black_box(decoded);
        });
    });
}

fn bench_apply_migrations(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_migrations");

    for &count in MIGRATION_COUNTS {
        let sources: Vec<(String, String)> = (1..=count)
            .map(|v| {
                (
                    format!("{v:03}_table_{v}.sql"),
                    format!("CREATE TABLE t{v} (id INTEGER PRIMARY KEY, body TEXT);"),
                )
            })
            .collect();
        let migrator = Migrator::from_sources(sources).expect("invalid benchmark scripts");

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter_batched(
                || Connection::open_in_memory().expect("failed to open connection"),
                |mut conn| {
                    let applied = migrator.apply(&mut conn).expect("migration failed");
                    black_box(applied);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_set,
    bench_get,
    bench_json_round_trip,
    bench_apply_migrations
);
criterion_main!(benches);
