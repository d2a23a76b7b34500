//! Feeds a synthesized tone sequence through the engine from a producer
//! thread and polls the reader at display rate, printing note readings the
//! way a tuner face would show them.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Result;

use tuner_engine::{FrequencyCalculator, PitchEngine, ToneGenerator};

const SAMPLE_RATE: f64 = 48000.0;
const BLOCK_SIZE: usize = 256;

fn main() -> Result<()> {
    env_logger::init();

    let mut engine = PitchEngine::new(4096, SAMPLE_RATE);
    let reader = engine.reader();
    let stop = Arc::new(AtomicBool::new(false));

    // Guitar standard tuning, low E to high E.
    let frequencies = [82.41, 110.0, 146.83, 196.0, 246.94, 329.63];
    let blocks_per_note = (SAMPLE_RATE as usize) / BLOCK_SIZE; // ~1 s per note

    let producer_stop = Arc::clone(&stop);
    let producer = thread::spawn(move || {
        let mut generator = ToneGenerator::new(frequencies[0]);
        let mut block = [0.0_f32; BLOCK_SIZE];
        let block_duration = Duration::from_secs_f64(BLOCK_SIZE as f64 / SAMPLE_RATE);

        'outer: for frequency in frequencies {
            generator.set_frequency(frequency);
            for _ in 0..blocks_per_note {
                if producer_stop.load(Ordering::Acquire) {
                    break 'outer;
                }
                generator.generate(&mut block, SAMPLE_RATE);
                engine.push_audio(&block);
                thread::sleep(block_duration);
            }
        }
    });

    let calculator = FrequencyCalculator::new();
    let poll_interval = Duration::from_millis(16);
    let poll_count = frequencies.len() * 64;

    for _ in 0..poll_count {
        thread::sleep(poll_interval);
        match reader.read_latest() {
            Some((frequency, confidence)) => {
                let reading = calculator.describe(frequency);
                println!(
                    "{}{} {:+6.1} cents | {:8.2} Hz | confidence {:.2}",
                    reading.name, reading.octave, reading.cents, frequency, confidence
                );
            }
            None => println!("--       --      |       -- Hz | confidence 0.00"),
        }
    }

    stop.store(true, Ordering::Release);
    producer.join().expect("producer thread panicked");
    Ok(())
}
