use actionrouter::actions;
use actionrouter::registry::TypeRegistry;
use actionrouter::routes::compile_routes;
use actionrouter::router::Router;
use criterion::{criterion_group, criterion_main, Criterion};
use http::Method;
use std::hint::black_box;

fn example_routes() -> &'static str {
    r#"# Zoo application
get   /                         home#index
get   /about                    home#about
get   /zoo/animals              animal#index
post  /zoo/animals              animal#create
match /zoo/animals:params       animal#show
get   /zoo/health               health#check
post  /inventory:params         inventory#batch
match /complex:params           complex#many
"#
}

/// Table where the interesting routes sit behind `n` unrelated literal rules.
fn padded_routes(n: usize) -> String {
    let mut config = String::new();
    for i in 0..n {
        config.push_str(&format!("get /padding/{i} pad#index\n"));
    }
    config.push_str(example_routes());
    config
}

#[derive(Default)]
struct AnimalController {
    last: Option<String>,
}

#[actions]
impl AnimalController {
    pub fn show(&mut self, id: String) {
        self.last = Some(id);
    }

    #[action("show")]
    pub fn show_nested(&mut self, id: String, section: String) {
        self.last = Some(format!("{id}/{section}"));
    }
}

fn bench_compile(c: &mut Criterion) {
    let config = padded_routes(200);
    c.bench_function("compile_routes", |b| {
        b.iter(|| black_box(compile_routes(black_box(&config))))
    });
}

fn bench_route_throughput(c: &mut Criterion) {
    let (router, _) = Router::from_config(example_routes());
    c.bench_function("route_match", |b| {
        let test_paths = [
            (Method::GET, "/about/"),
            (Method::GET, "/zoo/animals/123"),
            (Method::GET, "/zoo/animals/123/toys/456"),
            (Method::POST, "/inventory/1/feeds/2/items/3/batches/4"),
            (Method::GET, "/complex/1/2/3/4/5/6/7/8/9"),
            (Method::GET, "/not/here"),
        ];
        b.iter(|| {
            for (method, path) in test_paths.iter() {
                let res = router.route(method, path);
                black_box(&res);
            }
        })
    });

    let (padded, _) = Router::from_config(&padded_routes(500));
    c.bench_function("route_match_behind_500_rules", |b| {
        b.iter(|| black_box(padded.route(&Method::GET, black_box("/zoo/animals/123"))))
    });
}

fn bench_dispatch(c: &mut Criterion) {
    let mut registry = TypeRegistry::new();
    registry.register::<AnimalController>("animalcontroller");
    let args = vec!["123".to_string(), "toys".to_string(), "456".to_string()];

    c.bench_function("dispatch_arity_search", |b| {
        b.iter(|| {
            let mut dispatcher = registry.dispatcher("animalcontroller");
            dispatcher.dispatch("show", black_box(&args));
            black_box(
                dispatcher
                    .object_as::<AnimalController>()
                    .and_then(|animal| animal.last.take()),
            )
        })
    });
}

criterion_group!(benches, bench_compile, bench_route_throughput, bench_dispatch);
criterion_main!(benches);
