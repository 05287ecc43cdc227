use agro_advisor::models::{
    FarmProfile, FarmProfileInput, SoilParameter, SoilSample, SoilSampleInput, TreatmentRequest,
    TreatmentRequestInput, YieldRequest, YieldRequestInput,
};
use agro_advisor::utils::{
    log_error, print_recommendations, print_soil_report, print_treatment, print_yield,
};
use agro_advisor::{Advisor, AdvisorError, Result};
use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::env;
use std::process;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static ARG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z_]+)=(.+)$").expect("valid argument pattern"));

fn print_usage() {
    eprintln!("Usage: advise <command> [format=json] [key=value ...]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  recommend  soil_health= season= budget= market_demand= area_acres= soil_type= [prior_yield=]");
    eprintln!("  yield      crop= soil_type= area_acres= [prior_yield=]");
    eprintln!("  treat      crop= field_size_acres= soil_type= growth_stage= [start_date=YYYY-MM-DD]");
    eprintln!("  soil       soil_type= [season=] ph= nitrogen= phosphorus= potassium= [organic_matter= moisture= temperature= salinity=]");
}

struct Args(BTreeMap<String, String>);

impl Args {
    fn parse(raw: &[String]) -> Result<Self> {
        let mut pairs = BTreeMap::new();
        for arg in raw {
            let caps = ARG_RE
                .captures(arg)
                .ok_or_else(|| AdvisorError::validation(arg.as_str(), "expected key=value"))?;
            pairs.insert(caps[1].to_lowercase(), caps[2].to_string());
        }
        Ok(Self(pairs))
    }

    fn get<T: FromStr>(&self, key: &str) -> Result<Option<T>> {
        match self.0.get(key) {
            None => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| AdvisorError::validation(key, format!("could not parse '{raw}'"))),
        }
    }

    fn readings(&self) -> Result<BTreeMap<SoilParameter, f64>> {
        let mut readings = BTreeMap::new();
        for (key, raw) in &self.0 {
            let Ok(parameter) = SoilParameter::from_str(key) else {
                continue;
            };
            let value = raw.parse().map_err(|_| {
                AdvisorError::validation(key.as_str(), format!("could not parse '{raw}'"))
            })?;
            readings.insert(parameter, value);
        }
        Ok(readings)
    }
}

fn emit<T: Serialize>(value: &T, json: bool, print: impl FnOnce(&T)) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print(value);
    }
    Ok(())
}

fn run(command: &str, args: &Args, advisor: &Advisor) -> anyhow::Result<()> {
    let json = args.get::<String>("format")?.as_deref() == Some("json");
    match command {
        "recommend" => {
            let profile = FarmProfile::try_from(FarmProfileInput {
                soil_health: args.get("soil_health")?,
                season: args.get("season")?,
                budget: args.get("budget")?,
                market_demand: args.get("market_demand")?,
                area_acres: args.get("area_acres")?,
                soil_type: args.get("soil_type")?,
                prior_yield: args.get("prior_yield")?,
            })?;
            let assessments = advisor.evaluate_candidates(&profile)?;
            let ranked = advisor.get_recommendations(&profile)?;
            emit(&ranked, json, |ranked| {
                print_recommendations(&profile, &assessments, ranked)
            })?;
        }
        "yield" => {
            let request = YieldRequest::try_from(YieldRequestInput {
                crop: args.get("crop")?,
                soil_type: args.get("soil_type")?,
                area_acres: args.get("area_acres")?,
                prior_yield: args.get("prior_yield")?,
            })?;
            let projections = advisor.predict_yield(&request)?;
            emit(&projections, json, |p| print_yield(&request, p))?;
        }
        "treat" => {
            let request = TreatmentRequest::try_from(TreatmentRequestInput {
                crop: args.get("crop")?,
                field_size_acres: args.get("field_size_acres")?,
                soil_type: args.get("soil_type")?,
                growth_stage: args.get("growth_stage")?,
                start_date: args.get::<NaiveDate>("start_date")?,
            })?;
            emit(&advisor.optimize_treatment(&request)?, json, print_treatment)?;
        }
        "soil" => {
            let sample = SoilSample::try_from(SoilSampleInput {
                soil_type: args.get("soil_type")?,
                season: args.get("season")?,
                readings: args.readings()?,
            })?;
            emit(&advisor.assess_soil(&sample)?, json, print_soil_report)?;
        }
        _ => {
            print_usage();
            process::exit(1);
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("agro_advisor=warn".parse()?))
        .with(fmt::layer().with_target(false).compact())
        .init();

    let raw: Vec<String> = env::args().skip(1).collect();
    let Some((command, rest)) = raw.split_first() else {
        print_usage();
        process::exit(1);
    };

    let advisor = Advisor::default();
    let outcome = Args::parse(rest)
        .map_err(anyhow::Error::from)
        .and_then(|args| run(command, &args, &advisor));
    if let Err(e) = outcome {
        match e.downcast_ref::<AdvisorError>() {
            Some(err) => log_error(err),
            None => eprintln!("{e:#}"),
        }
        process::exit(1);
    }

    Ok(())
}
