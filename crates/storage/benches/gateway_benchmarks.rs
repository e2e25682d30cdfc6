//! Cost of whole-collection read-modify-write as the collection grows.

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use gatehouse_entities::EntityFormData;
use gatehouse_storage::{EntityGateway, InMemoryKeyValueStore};
use tokio::runtime::Runtime;

fn seeded_gateway(rt: &Runtime, size: usize) -> EntityGateway<Arc<InMemoryKeyValueStore>> {
    let gateway = EntityGateway::new(InMemoryKeyValueStore::arc());
    rt.block_on(async {
        for i in 0..size {
            let data = EntityFormData::new(
                format!("{i:011}"),
                format!("{:07}", i % 10_000_000),
                "Visitor",
            );
            gateway.create(data).await.expect("seed entity");
        }
    });
    gateway
}

fn bench_get_all(c: &mut Criterion) {
    let rt = Runtime::new().expect("tokio runtime");
    let mut group = c.benchmark_group("gateway_get_all");

    for size in [10usize, 100, 1_000] {
        let gateway = seeded_gateway(&rt, size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| rt.block_on(async { black_box(gateway.get_all().await.expect("get_all")) }));
        });
    }

    group.finish();
}

fn bench_update(c: &mut Criterion) {
    let rt = Runtime::new().expect("tokio runtime");
    let mut group = c.benchmark_group("gateway_update");

    for size in [10usize, 100, 1_000] {
        let gateway = seeded_gateway(&rt, size);
        let target = rt
            .block_on(gateway.get_all())
            .expect("get_all")
            .pop()
            .expect("seeded");
        let data = target.form_data().with_active(false);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                rt.block_on(async {
                    use gatehouse_core::Identified;
                    black_box(gateway.update(target.id(), data.clone()).await.expect("update"))
                })
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_get_all, bench_update);
criterion_main!(benches);
