use crate::quantity::{energy::KilowattHours, time::Hours};

quantity!(Kilowatts, "kW");

implement_mul!(Kilowatts, Hours, KilowattHours);
