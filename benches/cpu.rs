use criterion::{criterion_group, criterion_main, Criterion};
use gboyemu::{gb::GameBoy, rom::RomType, test::build_rom};

fn benchmark_cpu_clock(c: &mut Criterion) {
    let mut data = build_rom(RomType::RomOnly, 2, 0x00);

    // a tight JR loop at the entry point keeps the PC inside
    // the cartridge for the whole benchmark
    data[0x0150] = 0x18;
    data[0x0151] = 0xfe;

    let mut gb = GameBoy::new();
    gb.load_rom(&data).unwrap();
    gb.boot();

    c.bench_function("cpu_cycles", |b| {
        b.iter(|| {
            gb.clocks_cycles(1_000_000);
        })
    });
}

criterion_group!(benches, benchmark_cpu_clock);
criterion_main!(benches);
