use criterion::{criterion_group, criterion_main, Criterion};
use record_transcode::{
    transcode, Container, FieldDescriptor, InputValue, Transcoder, TypeDescriptor, UnionPolicy,
};
use std::hint::black_box;

fn order_descriptor() -> TypeDescriptor {
    let line_item = TypeDescriptor::record(
        "line_item",
        vec![
            FieldDescriptor::new("sku", TypeDescriptor::String),
            FieldDescriptor::new("qty", TypeDescriptor::Int),
            FieldDescriptor::new("price", TypeDescriptor::nullable(TypeDescriptor::Double)),
            FieldDescriptor::new("attrs", TypeDescriptor::map(TypeDescriptor::String)),
        ],
    );
    TypeDescriptor::record(
        "order",
        vec![
            FieldDescriptor::new("id", TypeDescriptor::Long),
            FieldDescriptor::new("customer", TypeDescriptor::nullable(TypeDescriptor::String)),
            FieldDescriptor::new(
                "items",
                TypeDescriptor::array(TypeDescriptor::union(vec![
                    TypeDescriptor::Null,
                    line_item,
                    TypeDescriptor::Long,
                ])),
            ),
        ],
    )
}

fn order_input(items: usize) -> InputValue {
    let items = (0..items)
        .map(|i| {
            let attrs: Container = Container::new().with("color", "red").with("size", "L");
            Container::new()
                .with("sku", format!("SKU-{i}"))
                .with("qty", i as i64)
                .with("price", 9.99)
                .with("attrs", InputValue::Mapping(attrs.as_map().clone()))
                .into()
        })
        .collect::<Vec<InputValue>>();
    Container::new()
        .with("id", 42i64)
        .with("customer", "acme")
        .with("items", items)
        .into()
}

fn bench_transcode(c: &mut Criterion) {
    let descriptor = order_descriptor();
    let input = order_input(50);

    c.bench_function("transcode/order_50_items", |b| {
        b.iter(|| transcode(black_box(&descriptor), black_box(&input)))
    });

    let strict = Transcoder::with_policy(UnionPolicy::STRICT);
    c.bench_function("transcode/order_50_items_strict", |b| {
        b.iter(|| strict.transcode(black_box(&descriptor), black_box(&input)))
    });
}

criterion_group!(benches, bench_transcode);
criterion_main!(benches);
