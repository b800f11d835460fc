mod rsa;

pub use crate::rsa::*;

use std::error::Error;

use chrono::Local;
use clap::{ArgGroup, Parser};

#[derive(Debug, Parser)]
#[command(version, about = "Educational from-scratch RSA file encryption")]
#[command(group = ArgGroup::new("action").required(true).args(["keygen", "encrypt", "decrypt"]))]
struct Args {
    #[arg(short, long, help = "Generate a key pair")]
    keygen: bool,
    #[arg(short, long, value_name = "EFILE", help = "Encrypt a file")]
    encrypt: Option<String>,
    #[arg(short, long, value_name = "DFILE", help = "Decrypt a file")]
    decrypt: Option<String>,
    #[arg(short, long, default_value = "output.encr", help = "Output filename")]
    output: String,
    #[arg(short = 's', long, default_value_t = CONFIG_DEF.bit_length, help = "Prime size in bits")]
    keysize: u64,
    #[arg(short = 'b', long, default_value = "public.pem", help = "Public key file")]
    public: String,
    #[arg(short = 'p', long, default_value = "private.pem", help = "Private key file")]
    private: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let start = Local::now().timestamp_millis();
    if args.keygen {
        println!("generating a {}-bit key pair", args.keysize * 2);
        let config = RsaConfig { bit_length: args.keysize, ..CONFIG_DEF.clone() };
        let key_pair = generate_key_pair(&config)?;
        key_pair.save(&args.public, &args.private)?;
        println!("wrote {} and {}", args.public, args.private);
        println!("finished keygen in {} ms", Local::now().timestamp_millis() - start);
    } else if let Some(input) = &args.encrypt {
        let key = Key::from_file(&args.public, KeyKind::Public)?;
        cipher::encrypt_file(&key, input, &args.output)?;
        println!("encrypted {} -> {}", input, args.output);
        println!("finished encrypting in {} ms", Local::now().timestamp_millis() - start);
    } else if let Some(input) = &args.decrypt {
        let key = Key::from_file(&args.private, KeyKind::Private)?;
        cipher::decrypt_file(&key, input, &args.output)?;
        println!("decrypted {} -> {}", input, args.output);
        println!("finished decrypting in {} ms", Local::now().timestamp_millis() - start);
    }
    Ok(())
}
