//! Wrapper module to export to Python using pyo3 bindings.

use crate::calendars::{weekday_name, Adjuster, Calendar, CalendarAdjustment};
use crate::json::json_py::DeserializedObj;
use crate::json::JSON;
use crate::py::{dates_to_py, values_to_py, DateLike, OneOrMany};
use chrono::NaiveDate;
use ndarray::Array1;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyType;

type NewArgs = (
    Vec<NaiveDate>,
    Vec<String>,
    NaiveDate,
    NaiveDate,
    Option<String>,
    bool,
);

#[pymethods]
impl Calendar {
    /// Create a new *Calendar* object.
    ///
    /// Parameters
    /// ----------
    /// holidays: list[date | str], optional
    ///     Dates that are not business days.
    /// weekdays: list[str], optional
    ///     Names of the weekdays that are not business days, e.g. ``["Saturday", "Sunday"]``.
    /// start: date | str, optional
    ///     The first valid date. Defaults to the earliest holiday.
    /// end: date | str, optional
    ///     The last valid date. Defaults to the latest holiday.
    /// name: str, optional
    ///     The name of the calendar.
    /// financial: bool
    ///     Whether the calendar counts business days with the financial convention.
    #[new]
    #[pyo3(signature = (holidays=None, weekdays=None, start=None, end=None, name=None, financial=true))]
    fn new_py(
        holidays: Option<Vec<DateLike>>,
        weekdays: Option<Vec<String>>,
        start: Option<DateLike>,
        end: Option<DateLike>,
        name: Option<String>,
        financial: bool,
    ) -> PyResult<Self> {
        let holidays = holidays
            .unwrap_or_default()
            .iter()
            .map(DateLike::to_date)
            .collect::<PyResult<Vec<NaiveDate>>>()?;
        let mut builder = Calendar::builder()
            .with_holidays(holidays)
            .with_weekday_names(&weekdays.unwrap_or_default())
            .with_financial(financial);
        if let Some(start) = start {
            builder = builder.with_start(start.to_date()?);
        }
        if let Some(end) = end {
            builder = builder.with_end(end.to_date()?);
        }
        if let Some(name) = name {
            builder = builder.with_name(name);
        }
        Ok(builder.build()?)
    }

    /// Load a bundled calendar by name, e.g. ``"ANBIMA"``, or a calendar file by path.
    ///
    /// Parameters
    /// ----------
    /// name: str
    ///     The calendar name or file path.
    ///
    /// Returns
    /// -------
    /// Calendar
    #[classmethod]
    #[pyo3(name = "load")]
    fn load_py(_cls: &Bound<'_, PyType>, name: &str) -> PyResult<Self> {
        Ok(Calendar::load(name)?)
    }

    /// The name of the calendar.
    #[getter(name)]
    fn name_py(&self) -> Option<String> {
        self.name.clone()
    }

    /// A sorted list of the holidays.
    #[getter(holidays)]
    fn holidays_py(&self) -> Vec<NaiveDate> {
        self.holidays()
    }

    /// A list of the names of non-working weekdays.
    #[getter(weekdays)]
    fn weekdays_py(&self) -> Vec<&'static str> {
        self.weekdays().into_iter().map(weekday_name).collect()
    }

    /// The first valid date.
    #[getter(startdate)]
    fn startdate_py(&self) -> NaiveDate {
        self.start
    }

    /// The last valid date.
    #[getter(enddate)]
    fn enddate_py(&self) -> NaiveDate {
        self.end
    }

    /// Whether the calendar counts business days with the financial convention.
    #[getter(financial)]
    fn financial_py(&self) -> bool {
        self.financial
    }

    #[setter(financial)]
    fn set_financial_py(&mut self, financial: bool) {
        self.set_financial(financial)
    }

    /// Return whether dates are business days.
    ///
    /// Parameters
    /// ----------
    /// dates: date | str | list
    ///     Dates to test.
    ///
    /// Returns
    /// -------
    /// bool | list[bool]
    #[pyo3(name = "isbizday")]
    fn isbizday_py<'py>(
        &self,
        py: Python<'py>,
        dates: OneOrMany<DateLike>,
    ) -> PyResult<Bound<'py, PyAny>> {
        let result = self.vec().isbizday(&dates.to_dates()?)?;
        values_to_py(py, &self.options, result, dates.is_scalar())
    }

    /// Return the number of business days between dates.
    ///
    /// Parameters
    /// ----------
    /// date_from: date | str | list
    ///     Start dates.
    /// date_to: date | str | list
    ///     End dates.
    ///
    /// Returns
    /// -------
    /// int | list[int]
    #[pyo3(name = "bizdays")]
    fn bizdays_py<'py>(
        &self,
        py: Python<'py>,
        date_from: OneOrMany<DateLike>,
        date_to: OneOrMany<DateLike>,
    ) -> PyResult<Bound<'py, PyAny>> {
        let result = self
            .vec()
            .bizdays(&date_from.to_dates()?, &date_to.to_dates()?)?;
        let scalar = date_from.is_scalar() && date_to.is_scalar();
        values_to_py(py, &self.options, result, scalar)
    }

    /// Return dates moved by a number of business days.
    ///
    /// Parameters
    /// ----------
    /// dates: date | str | list
    ///     Dates to move.
    /// n: int | list[int]
    ///     Number of business days, negative to move backwards.
    ///
    /// Returns
    /// -------
    /// date | list[date]
    #[pyo3(name = "offset")]
    fn offset_py<'py>(
        &self,
        py: Python<'py>,
        dates: OneOrMany<DateLike>,
        n: OneOrMany<i32>,
    ) -> PyResult<Bound<'py, PyAny>> {
        let result = self.vec().offset(&dates.to_dates()?, n.as_slice())?;
        dates_to_py(py, &self.options, result, dates.is_scalar() && n.is_scalar())
    }

    /// Return dates rolled to the following business day.
    #[pyo3(name = "following")]
    fn following_py<'py>(
        &self,
        py: Python<'py>,
        dates: OneOrMany<DateLike>,
    ) -> PyResult<Bound<'py, PyAny>> {
        let result = self.vec().following(&dates.to_dates()?)?;
        dates_to_py(py, &self.options, result, dates.is_scalar())
    }

    /// Return dates rolled to the following business day, within the month.
    #[pyo3(name = "modified_following")]
    fn modified_following_py<'py>(
        &self,
        py: Python<'py>,
        dates: OneOrMany<DateLike>,
    ) -> PyResult<Bound<'py, PyAny>> {
        let result = self.vec().modified_following(&dates.to_dates()?)?;
        dates_to_py(py, &self.options, result, dates.is_scalar())
    }

    /// Return dates rolled to the preceding business day.
    #[pyo3(name = "preceding")]
    fn preceding_py<'py>(
        &self,
        py: Python<'py>,
        dates: OneOrMany<DateLike>,
    ) -> PyResult<Bound<'py, PyAny>> {
        let result = self.vec().preceding(&dates.to_dates()?)?;
        dates_to_py(py, &self.options, result, dates.is_scalar())
    }

    /// Return dates rolled to the preceding business day, within the month.
    #[pyo3(name = "modified_preceding")]
    fn modified_preceding_py<'py>(
        &self,
        py: Python<'py>,
        dates: OneOrMany<DateLike>,
    ) -> PyResult<Bound<'py, PyAny>> {
        let result = self.vec().modified_preceding(&dates.to_dates()?)?;
        dates_to_py(py, &self.options, result, dates.is_scalar())
    }

    /// Return dates adjusted under a named rolling rule.
    ///
    /// Parameters
    /// ----------
    /// dates: date | str | list
    ///     Dates to adjust.
    /// rule: str
    ///     One of ``"following"``, ``"preceding"``, ``"modified_following"``,
    ///     ``"modified_preceding"`` or ``"actual"``.
    ///
    /// Returns
    /// -------
    /// date | list[date]
    #[pyo3(name = "adjust")]
    fn adjust_py<'py>(
        &self,
        py: Python<'py>,
        dates: OneOrMany<DateLike>,
        rule: &str,
    ) -> PyResult<Bound<'py, PyAny>> {
        let adjuster: Adjuster = rule.parse()?;
        let result = self.adjusts(&dates.to_dates()?, &adjuster)?;
        dates_to_py(py, &self.options, Array1::from_vec(result), dates.is_scalar())
    }

    /// Return the business days between two dates, inclusive.
    ///
    /// Returns
    /// -------
    /// list[date]
    #[pyo3(name = "seq")]
    fn seq_py<'py>(
        &self,
        py: Python<'py>,
        date_from: DateLike,
        date_to: DateLike,
    ) -> PyResult<Bound<'py, PyAny>> {
        let days: Vec<NaiveDate> = self
            .seq(&date_from.to_date()?, &date_to.to_date()?)?
            .collect();
        dates_to_py(py, &self.options, Array1::from_vec(days), false)
    }

    /// Return the date described by a relative expression, e.g. ``"last fri"``.
    ///
    /// Parameters
    /// ----------
    /// expr: str | list[str]
    ///     The expression.
    /// year: int | list[int], optional
    ///     The year the expression refers to.
    /// month: int | list[int], optional
    ///     The month the expression refers to. Without it the window is the year.
    /// adjust: str, optional
    ///     A rolling rule applied to the result.
    ///
    /// Returns
    /// -------
    /// date | list[date]
    #[pyo3(name = "getdate", signature = (expr, year=None, month=None, adjust=None))]
    fn getdate_py<'py>(
        &self,
        py: Python<'py>,
        expr: OneOrMany<String>,
        year: Option<OneOrMany<i32>>,
        month: Option<OneOrMany<u32>>,
        adjust: Option<&str>,
    ) -> PyResult<Bound<'py, PyAny>> {
        let exprs: Vec<&str> = expr.as_slice().iter().map(String::as_str).collect();
        let years: Vec<Option<i32>> = match &year {
            Some(y) => y.as_slice().iter().copied().map(Some).collect(),
            None => vec![None],
        };
        let months: Vec<Option<u32>> = match &month {
            Some(m) => m.as_slice().iter().copied().map(Some).collect(),
            None => vec![None],
        };
        let mut result = self.vec().getdate(&exprs, &years, &months)?;
        if let Some(rule) = adjust {
            let adjuster: Adjuster = rule.parse()?;
            result = Array1::from_vec(self.adjusts(&result.to_vec(), &adjuster)?);
        }
        let scalar = expr.is_scalar()
            && year.as_ref().map_or(true, OneOrMany::is_scalar)
            && month.as_ref().map_or(true, OneOrMany::is_scalar);
        dates_to_py(py, &self.options, result, scalar)
    }

    /// Return the number of business days of a month, or of a year.
    #[pyo3(name = "getbizdays", signature = (year, month=None))]
    fn getbizdays_py<'py>(
        &self,
        py: Python<'py>,
        year: OneOrMany<i32>,
        month: Option<OneOrMany<u32>>,
    ) -> PyResult<Bound<'py, PyAny>> {
        let months: Vec<Option<u32>> = match &month {
            Some(m) => m.as_slice().iter().copied().map(Some).collect(),
            None => vec![None],
        };
        let result = self.vec().getbizdays(year.as_slice(), &months)?;
        let scalar = year.is_scalar() && month.as_ref().map_or(true, OneOrMany::is_scalar);
        values_to_py(py, &self.options, result, scalar)
    }

    /// Set an output option of this calendar only.
    #[pyo3(name = "set_option")]
    fn set_option_py(&mut self, key: &str, value: &str) -> PyResult<()> {
        Ok(self.options.set(key, value)?)
    }

    /// Return an output option of this calendar.
    #[pyo3(name = "get_option")]
    fn get_option_py(&self, key: &str) -> PyResult<String> {
        Ok(self.options.get(key)?)
    }

    // Pickling
    fn __getnewargs__(&self) -> PyResult<NewArgs> {
        Ok((
            self.holidays(),
            self.weekdays_py().into_iter().map(String::from).collect(),
            self.start,
            self.end,
            self.name.clone(),
            self.financial,
        ))
    }

    // JSON
    /// Return a JSON representation of the object.
    ///
    /// Returns
    /// -------
    /// str
    #[pyo3(name = "to_json")]
    fn to_json_py(&self) -> PyResult<String> {
        match DeserializedObj::Calendar(self.clone()).to_json() {
            Ok(v) => Ok(v),
            Err(_) => Err(PyValueError::new_err(
                "Failed to serialize `Calendar` to JSON.",
            )),
        }
    }

    // Equality
    fn __eq__(&self, other: Calendar) -> bool {
        *self == other
    }

    fn __repr__(&self) -> String {
        format!("<bizdays.Calendar '{}' at {:p}>", self.name().unwrap_or(""), self)
    }

    fn __str__(&self) -> String {
        self.to_string()
    }
}
