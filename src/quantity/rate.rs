quantity!(
    /// Price per kilowatt-hour, in the price file's currency.
    KilowattHourRate,
    "¤/kWh"
);
